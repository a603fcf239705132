//! The globe viewer binary.
//!
//! Configuration is loaded from `config.ron` and can be overridden via CLI flags.
//! Run with `cargo run -p globe-app -- --texture earth.jpg` to pick a texture.

use clap::Parser;
use globe_app::{AppError, PlatformDirs, run};
use globe_config::{CliArgs, Config};
use globe_log::init_logging;
use tracing::info;

fn main() {
    let args = CliArgs::parse();
    if let Err(e) = launch(&args) {
        eprintln!("globe: {e}");
        std::process::exit(1);
    }
}

fn launch(args: &CliArgs) -> Result<(), AppError> {
    let dirs = PlatformDirs::resolve_and_create()?;
    let config_dir = args.config.clone().unwrap_or_else(|| dirs.config_dir.clone());

    let mut config = Config::load_or_create(&config_dir)?;
    config.apply_cli_overrides(args);

    init_logging(Some(&dirs.log_dir), cfg!(debug_assertions), Some(&config));
    info!(
        "Globe viewer starting: config {}, {}x{}, {} stars, {}x MSAA",
        config_dir.display(),
        config.window.width,
        config.window.height,
        config.stars.count,
        config.render.sample_count()
    );

    run(config)
}
