/// Command line configuration for the terminal demo
use std::path::PathBuf;

use clap::Parser;

use crate::scene::MAX_LIGHTS;

/// Lit 3D scene rendered as ASCII in the terminal
#[derive(Parser, Debug, Clone)]
#[command(name = "wm-terminal")]
#[command(about = "Lit 3D scene rendered as ASCII in the terminal", long_about = None)]
pub struct Args {
    /// Vertical field of view in degrees
    #[arg(long, default_value_t = 60.0)]
    pub fov: f32,

    /// Start with an orthographic projection
    #[arg(short, long)]
    pub orthographic: bool,

    /// View volume height in orthographic mode
    #[arg(long, default_value_t = 6.0)]
    pub ortho_height: f32,

    /// Near clipping plane distance
    #[arg(long, default_value_t = 0.1)]
    pub near: f32,

    /// Far clipping plane distance
    #[arg(long, default_value_t = 100.0)]
    pub far: f32,

    /// Number of active lights
    #[arg(
        short,
        long,
        default_value_t = 1,
        value_parser = clap::value_parser!(u8).range(1..=MAX_LIGHTS as i64)
    )]
    pub lights: u8,

    /// Start with the lights orbiting the origin
    #[arg(long)]
    pub orbit: bool,

    /// Target frame rate
    #[arg(long, default_value_t = 30, value_parser = clap::value_parser!(u32).range(1..=240))]
    pub fps: u32,

    /// Write tracing output to this file (filtered by RUST_LOG, default info)
    #[arg(long)]
    pub log_file: Option<PathBuf>,
}

impl Default for Args {
    fn default() -> Self {
        Self::parse_from(["wm-terminal"])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let args = Args::default();
        assert_eq!(args.fov, 60.0);
        assert!(!args.orthographic);
        assert_eq!(args.ortho_height, 6.0);
        assert_eq!(args.near, 0.1);
        assert_eq!(args.far, 100.0);
        assert_eq!(args.lights, 1);
        assert_eq!(args.fps, 30);
        assert!(args.log_file.is_none());
    }

    #[test]
    fn test_overrides() {
        let args = Args::parse_from([
            "wm-terminal",
            "--orthographic",
            "--lights",
            "4",
            "--fov",
            "75",
            "--log-file",
            "wm.log",
        ]);
        assert!(args.orthographic);
        assert_eq!(args.lights, 4);
        assert_eq!(args.fov, 75.0);
        assert_eq!(args.log_file, Some(PathBuf::from("wm.log")));
    }

    #[test]
    fn test_light_count_is_bounded() {
        assert!(Args::try_parse_from(["wm-terminal", "--lights", "0"]).is_err());
        assert!(Args::try_parse_from(["wm-terminal", "--lights", "5"]).is_err());
    }
}
