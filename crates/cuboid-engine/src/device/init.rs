/// Initialization parameters for the GPU layer.
#[derive(Debug, Clone)]
pub struct GpuInit {
    /// Prefer an sRGB surface format when available.
    ///
    /// When `false`, a linear (non-sRGB) format is preferred so shader output
    /// is written to the framebuffer unencoded.
    pub prefer_srgb: bool,

    /// Present mode (swap behavior). FIFO waits for vsync.
    pub present_mode: wgpu::PresentMode,

    /// Optional alpha mode preference for the surface.
    ///
    /// If provided but unsupported on the current surface, a supported mode is selected.
    pub alpha_mode: Option<wgpu::CompositeAlphaMode>,

    /// Required wgpu features.
    pub required_features: wgpu::Features,

    /// Limits requested from the adapter/device.
    pub required_limits: wgpu::Limits,

    /// Desired maximum frame latency for the surface (hint).
    pub desired_maximum_frame_latency: u32,

    /// Depth attachment format. `None` disables the depth buffer.
    pub depth_format: Option<wgpu::TextureFormat>,
}

impl Default for GpuInit {
    fn default() -> Self {
        Self {
            prefer_srgb: true,
            present_mode: wgpu::PresentMode::Fifo,
            alpha_mode: None,
            required_features: wgpu::Features::empty(),
            required_limits: wgpu::Limits::default(),
            desired_maximum_frame_latency: 2,
            depth_format: Some(wgpu::TextureFormat::Depth32Float),
        }
    }
}
