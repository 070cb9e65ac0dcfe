/// Display context - viewport dimensions in physical pixels
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DisplayContext {
    /// Width in pixels
    pub width: u32,
    /// Height in pixels
    pub height: u32,
}

impl DisplayContext {
    /// Create new display context
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// Width over height, as used for the camera projection
    pub fn aspect_ratio(&self) -> f32 {
        if self.height == 0 {
            return 1.0;
        }
        self.width as f32 / self.height as f32
    }

    /// A zero-sized viewport (minimised window) cannot back a surface
    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_creates_context_with_dimensions() {
        let ctx = DisplayContext::new(1920, 1080);
        assert_eq!(ctx.width, 1920);
        assert_eq!(ctx.height, 1080);
    }

    #[test]
    fn test_aspect_ratio() {
        let ctx = DisplayContext::new(800, 600);
        assert!((ctx.aspect_ratio() - 4.0 / 3.0).abs() < 1e-6);
    }

    #[test]
    fn test_zero_height_aspect_is_finite() {
        let ctx = DisplayContext::new(800, 0);
        assert!(ctx.is_empty());
        assert_eq!(ctx.aspect_ratio(), 1.0);
    }

    #[test]
    fn test_copy_semantics() {
        let ctx1 = DisplayContext::new(1280, 720);
        let ctx2 = ctx1; // Copy, not move

        assert_eq!(ctx1, ctx2);
    }
}
