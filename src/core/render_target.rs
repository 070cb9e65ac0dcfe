use std::sync::atomic::{AtomicU32, Ordering};

static NEXT_TARGET_ID: AtomicU32 = AtomicU32::new(1);

/// Identifies a render target across scene and renderer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TargetId(u32);

/// Texture sampling filter
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Filter {
    Nearest,
    Linear,
}

impl From<Filter> for wgpu::FilterMode {
    fn from(filter: Filter) -> Self {
        match filter {
            Filter::Nearest => wgpu::FilterMode::Nearest,
            Filter::Linear => wgpu::FilterMode::Linear,
        }
    }
}

/// Offscreen render target description
///
/// Only describes the buffer; the renderer owns the GPU texture backing it
/// and allocates it on first use.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderTarget {
    id: TargetId,
    width: u32,
    height: u32,
    pub min_filter: Filter,
    pub mag_filter: Filter,
}

impl RenderTarget {
    /// New target with linear filtering
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            id: TargetId(NEXT_TARGET_ID.fetch_add(1, Ordering::Relaxed)),
            width,
            height,
            min_filter: Filter::Linear,
            mag_filter: Filter::Linear,
        }
    }

    pub fn id(&self) -> TargetId {
        self.id
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    /// Resize keeps the identity so scenes sampling the target stay valid
    pub fn set_size(&mut self, width: u32, height: u32) {
        self.width = width;
        self.height = height;
    }
}
