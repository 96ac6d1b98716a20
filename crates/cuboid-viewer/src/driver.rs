use anyhow::{Context, Result};

use cuboid_engine::core::{App, AppControl, FrameCtx, SetupCtx};
use cuboid_engine::math;
use cuboid_engine::mesh::Mesh;
use cuboid_engine::render::CubeRenderer;
use cuboid_engine::shader::ShaderSources;

/// Background color (opaque black).
const CLEAR: wgpu::Color = wgpu::Color::BLACK;

/// Drives the spinning cube: one-time GPU setup, then one draw per frame.
pub struct CubeDriver {
    sources: ShaderSources,
    mesh: Mesh,
    renderer: Option<CubeRenderer>,
}

impl CubeDriver {
    pub fn new() -> Self {
        Self {
            sources: ShaderSources::CUBE,
            mesh: Mesh::CUBE,
            renderer: None,
        }
    }
}

impl Default for CubeDriver {
    fn default() -> Self {
        Self::new()
    }
}

impl App for CubeDriver {
    fn on_setup(&mut self, ctx: &mut SetupCtx<'_, '_>) -> Result<()> {
        let program = self.sources.compile().context("built-in cube shaders rejected")?;

        let info = ctx.gpu.adapter_info();
        log::info!(
            "surface {:?}, depth {:?}, backend {:?}",
            ctx.gpu.surface_format(),
            ctx.gpu.depth_format(),
            info.backend
        );

        let rctx = ctx.render_ctx();
        let renderer = CubeRenderer::new(&rctx, program, self.mesh)
            .context("failed to create cube GPU resources")?;

        self.renderer = Some(renderer);
        Ok(())
    }

    fn on_frame(&mut self, ctx: &mut FrameCtx<'_, '_>) -> AppControl {
        let Some(renderer) = self.renderer.as_mut() else {
            return AppControl::Continue;
        };

        let transform = math::compose(ctx.time.elapsed);

        if ctx.time.frame_index % 600 == 0 {
            log::trace!("frame {} at t={:.2}s", ctx.time.frame_index, ctx.time.elapsed);
        }

        ctx.render(CLEAR, |rctx, target| {
            renderer.render(rctx, target, &transform);
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn driver_starts_without_gpu_resources() {
        let driver = CubeDriver::new();
        assert!(driver.renderer.is_none());
        assert_eq!(driver.sources, ShaderSources::CUBE);
        assert_eq!(driver.mesh.index_count(), 36);
    }

    #[test]
    fn driver_program_links_before_any_gpu_work() {
        let program = CubeDriver::new().sources.compile().unwrap();
        assert_eq!(program.interface.color_targets, vec![0]);
    }

    #[test]
    fn first_frame_shows_the_unrotated_cube() {
        let driver = CubeDriver::new();
        let m = math::compose(0.0);
        for v in driver.mesh.vertices {
            assert_eq!(m.transform_point(v.pos), v.pos);
        }
    }
}
