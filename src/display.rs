use std::time::Instant;

use glam::{Mat4, Vec3};
use log::{debug, info};
use rand::Rng;

use crate::camera::{IdentityCamera, PerspectiveCamera};
use crate::config::SceneConfig;
use crate::core::{Clock, DisplayContext, RenderTarget, Result, SceneRenderer};
use crate::scene::{Mesh, Node, Particle, Scene};

/// Display owns the renderer, both scenes and the frame clock
///
/// Drive it once per displayed frame with `update()` then `render()`.
/// The main scene is drawn into an offscreen target, which a fullscreen quad
/// then copies to the screen unmodified.
pub struct Display<R: SceneRenderer> {
    renderer: R,
    context: DisplayContext,
    clear_offscreen: bool,

    // Render-to-texture pass
    target: RenderTarget,
    quad_camera: IdentityCamera,
    quad_scene: Scene,

    // Main pass
    camera: PerspectiveCamera,
    orbit: Mat4,
    look_target: Vec3,
    scene: Scene,

    clock: Clock,
}

impl<R: SceneRenderer> Display<R> {
    /// Build both scenes for the given viewport
    pub fn new<G: Rng + ?Sized>(
        mut renderer: R,
        context: DisplayContext,
        config: &SceneConfig,
        rng: &mut G,
    ) -> Self {
        renderer.set_size(context.width, context.height);

        let (target, quad_scene) = Self::init_render_to_texture(context);
        let (camera, orbit, scene) = Self::init_main(context, config, rng);

        info!(
            "Scene built: {} particles, {}x{} offscreen target",
            scene.len(),
            target.width(),
            target.height()
        );

        Self {
            renderer,
            context,
            clear_offscreen: config.clear_offscreen,
            target,
            quad_camera: IdentityCamera,
            quad_scene,
            look_target: camera.target(),
            camera,
            orbit,
            scene,
            clock: Clock::new(),
        }
    }

    fn init_render_to_texture(context: DisplayContext) -> (RenderTarget, Scene) {
        let target = RenderTarget::new(context.width, context.height);

        let mut quad_scene = Scene::new();
        quad_scene.add(Node::new().with_mesh(Mesh::screen_quad(target.id())));

        (target, quad_scene)
    }

    fn init_main<G: Rng + ?Sized>(
        context: DisplayContext,
        config: &SceneConfig,
        rng: &mut G,
    ) -> (PerspectiveCamera, Mat4, Scene) {
        let mut camera = PerspectiveCamera::new(
            config.fov_degrees,
            context.aspect_ratio(),
            config.near,
            config.far,
        );
        camera.position = Vec3::new(0.0, 0.0, config.camera_distance);
        camera.look_at(Vec3::ZERO);

        let orbit = Mat4::from_rotation_y(config.orbit_step);

        let mut scene = Scene::new();
        for _ in 0..config.particle_count {
            let particle = Particle::random(rng);
            scene.add(particle.into_node(config.particle_radius, config.sphere_segments));
        }

        (camera, orbit, scene)
    }

    /// Advance one frame using wall-clock time
    /// Returns the elapsed seconds used for the step (zero on the first call)
    pub fn update(&mut self) -> f32 {
        self.update_at(Instant::now())
    }

    /// Advance one frame as if the current time were `now`
    pub fn update_at(&mut self, now: Instant) -> f32 {
        let dt = self.clock.tick_at(now);
        self.update_objects(dt);
        self.update_camera();
        dt
    }

    fn update_objects(&mut self, dt: f32) {
        self.scene.update(dt);
    }

    // Fixed step per frame, independent of dt
    fn update_camera(&mut self) {
        self.camera.apply_matrix(&self.orbit);
        self.camera.look_at(self.look_target);
    }

    /// Two-pass render: main scene into the offscreen target, then the
    /// target to the screen through the fullscreen quad.
    ///
    /// Auto-clear is off for the first pass unless `clear_offscreen` is set,
    /// so the target accumulates previous frames.
    pub fn render(&mut self) -> Result<()> {
        self.renderer.set_auto_clear(self.clear_offscreen);
        let offscreen = self
            .renderer
            .render(&self.scene, &self.camera, Some(&self.target));
        self.renderer.set_auto_clear(true);
        offscreen?;

        self.renderer.render(&self.quad_scene, &self.quad_camera, None)
    }

    /// Follow a viewport change; zero-sized viewports are ignored
    pub fn resize(&mut self, width: u32, height: u32) {
        let context = DisplayContext::new(width, height);
        if context.is_empty() {
            return;
        }

        debug!("Resizing display to {}x{}", width, height);
        self.context = context;
        self.renderer.set_size(width, height);
        self.camera.aspect = context.aspect_ratio();
        self.target.set_size(width, height);
    }

    pub fn context(&self) -> DisplayContext {
        self.context
    }

    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    pub fn scene_mut(&mut self) -> &mut Scene {
        &mut self.scene
    }

    pub fn quad_scene(&self) -> &Scene {
        &self.quad_scene
    }

    pub fn camera(&self) -> &PerspectiveCamera {
        &self.camera
    }

    pub fn render_target(&self) -> &RenderTarget {
        &self.target
    }

    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    pub fn renderer_mut(&mut self) -> &mut R {
        &mut self.renderer
    }
}
