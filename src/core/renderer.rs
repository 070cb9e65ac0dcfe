use crate::camera::Camera;
use crate::scene::Scene;

use super::render_target::RenderTarget;

pub type Result<T> = std::result::Result<T, Box<dyn std::error::Error>>;

/// Scene renderer - draws a scene from a camera into a target or the screen
pub trait SceneRenderer {
    /// Resize the output surface to the viewport
    fn set_size(&mut self, width: u32, height: u32);

    /// Whether render passes clear their attachments before drawing
    fn auto_clear(&self) -> bool;

    fn set_auto_clear(&mut self, enabled: bool);

    /// Render `scene` as seen by `camera`
    /// - target: offscreen target, or `None` for the window surface
    fn render(
        &mut self,
        scene: &Scene,
        camera: &dyn Camera,
        target: Option<&RenderTarget>,
    ) -> Result<()>;
}
