//! Command-line argument parsing.

use std::path::PathBuf;

use clap::Parser;

use crate::Config;

/// Globe viewer command-line arguments.
///
/// CLI values override settings loaded from `config.ron`.
#[derive(Parser, Debug, Default)]
#[command(name = "globe", about = "Rotating textured globe with atmosphere and stars")]
pub struct CliArgs {
    /// Initial window width.
    #[arg(long)]
    pub width: Option<u32>,

    /// Initial window height.
    #[arg(long)]
    pub height: Option<u32>,

    /// Globe surface texture (JPEG or PNG).
    #[arg(long)]
    pub texture: Option<PathBuf>,

    /// Number of stars.
    #[arg(long)]
    pub stars: Option<u32>,

    /// Disable multisampling.
    #[arg(long)]
    pub no_antialias: bool,

    /// Log level (error, warn, info, debug, trace).
    #[arg(long)]
    pub log_level: Option<String>,

    /// Path to config directory (overrides default location).
    #[arg(long)]
    pub config: Option<PathBuf>,
}

impl Config {
    /// Apply CLI overrides to a loaded config.
    pub fn apply_cli_overrides(&mut self, args: &CliArgs) {
        if let Some(w) = args.width {
            self.window.width = w;
        }
        if let Some(h) = args.height {
            self.window.height = h;
        }
        if let Some(ref path) = args.texture {
            self.globe.texture_path = path.clone();
        }
        if let Some(count) = args.stars {
            self.stars.count = count;
        }
        if args.no_antialias {
            self.render.antialias = false;
        }
        if let Some(ref level) = args.log_level {
            self.debug.log_level = level.clone();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_override() {
        let mut config = Config::default();
        let args = CliArgs {
            width: Some(800),
            texture: Some(PathBuf::from("moon.png")),
            no_antialias: true,
            ..CliArgs::default()
        };
        config.apply_cli_overrides(&args);
        assert_eq!(config.window.width, 800);
        assert_eq!(config.globe.texture_path, PathBuf::from("moon.png"));
        assert!(!config.render.antialias);
        // Non-overridden fields retain defaults
        assert_eq!(config.window.height, 720);
        assert_eq!(config.stars.count, 2500);
    }

    #[test]
    fn test_cli_no_override() {
        let original = Config::default();
        let mut config = Config::default();
        config.apply_cli_overrides(&CliArgs::default());
        assert_eq!(config, original);
    }

    #[test]
    fn test_cli_parses_flags() {
        let args = CliArgs::parse_from([
            "globe",
            "--width",
            "1024",
            "--stars",
            "100",
            "--no-antialias",
            "--log-level",
            "debug",
        ]);
        assert_eq!(args.width, Some(1024));
        assert_eq!(args.stars, Some(100));
        assert!(args.no_antialias);
        assert_eq!(args.log_level.as_deref(), Some("debug"));
        assert!(args.config.is_none());
    }
}
