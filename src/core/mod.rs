pub mod clock;
pub mod display_context;
pub mod fps;
pub mod gpu_context;
pub mod gpu_renderer;
pub mod render_target;
pub mod renderer;

pub use clock::Clock;
pub use display_context::DisplayContext;
pub use fps::FpsCounter;
pub use gpu_context::GpuContext;
pub use gpu_renderer::GpuRenderer;
pub use render_target::{Filter, RenderTarget, TargetId};
pub use renderer::{Result, SceneRenderer};
