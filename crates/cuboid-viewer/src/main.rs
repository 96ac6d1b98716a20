mod driver;

use cuboid_engine::device::GpuInit;
use cuboid_engine::logging::{init_logging, LoggingConfig};
use cuboid_engine::window::{Runtime, RuntimeConfig};

use driver::CubeDriver;

fn main() {
    init_logging(LoggingConfig::default());

    let config = RuntimeConfig::default();
    let gpu_init = GpuInit {
        // Shader output is the raw position; write it to the framebuffer unencoded.
        prefer_srgb: false,
        ..GpuInit::default()
    };

    log::info!(
        "opening \"{}\" ({}x{})",
        config.title,
        config.initial_size.width,
        config.initial_size.height
    );

    if let Err(err) = Runtime::run(config, gpu_init, CubeDriver::new()) {
        log::error!("cube renderer failed: {err:#}");
        std::process::exit(1);
    }
}
