use winit::dpi::PhysicalSize;

/// Depth attachment sized to the surface.
pub struct DepthTarget {
    pub format: wgpu::TextureFormat,
    pub texture: wgpu::Texture,
    pub view: wgpu::TextureView,
}

impl DepthTarget {
    pub fn new(device: &wgpu::Device, format: wgpu::TextureFormat, size: PhysicalSize<u32>) -> Self {
        let texture = device.create_texture(&wgpu::TextureDescriptor {
            label: Some("cuboid depth texture"),
            size: wgpu::Extent3d {
                width: size.width.max(1),
                height: size.height.max(1),
                depth_or_array_layers: 1,
            },
            mip_level_count: 1,
            sample_count: 1,
            dimension: wgpu::TextureDimension::D2,
            format,
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            view_formats: &[],
        });
        let view = texture.create_view(&wgpu::TextureViewDescriptor::default());

        Self { format, texture, view }
    }

    /// True if the attachment no longer matches `size`.
    pub fn is_stale(&self, size: PhysicalSize<u32>) -> bool {
        let s = self.texture.size();
        s.width != size.width.max(1) || s.height != size.height.max(1)
    }
}
