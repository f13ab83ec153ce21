/// WM Terminal Demo - Lit Scene
///
/// A cube on a plane lit by up to four point lights, drawn as ASCII.
/// Controls:
///   - WASD: Move, Space/C: Up/Down, Shift: Sprint
///   - Arrow Keys: Look around
///   - +/-: Zoom, P: Toggle orthographic
///   - L/K: Add/Remove light, O: Orbit lights
///   - R: Reset camera, Q/ESC: Quit

use clap::Parser;
use std::fs::File;
use std::io;
use std::path::Path;
use std::sync::Mutex;
use tracing_subscriber::EnvFilter;
use wm_terminal::{Args, Scene, TerminalApp};

fn main() -> io::Result<()> {
    let args = Args::parse();

    if let Some(path) = &args.log_file {
        init_logging(path)?;
    }
    tracing::info!(?args, "starting");

    let scene = Scene::new(&args)?;

    let mut app = TerminalApp::new(scene, args.fps)?;
    app.run()?;

    println!("Thank you for using the WM terminal renderer!");
    Ok(())
}

/// The terminal belongs to the renderer, so logs go to a file
fn init_logging(path: &Path) -> io::Result<()> {
    let file = File::create(path)?;
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .init();
    Ok(())
}
