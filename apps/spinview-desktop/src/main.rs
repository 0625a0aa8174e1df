mod app;
mod state;

use anyhow::Result;
use clap::Parser;
use spinview_common::{ProjectionProfile, ViewerConfig};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;
use winit::event_loop::{ControlFlow, EventLoop};

#[derive(Parser)]
#[command(name = "spinview-desktop", about = "Spinning pyramid with a first-person camera")]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    /// Config file (YAML or JSON)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Far-plane profile: standard (200) or short (100)
    #[arg(short, long)]
    profile: Option<ProjectionProfile>,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(filter))
        .init();

    let mut config = ViewerConfig::load_or_default(cli.config.as_deref())?;
    if let Some(profile) = cli.profile {
        config.profile = profile;
    }

    tracing::info!(
        "spinview-desktop starting ({}x{}, profile {})",
        config.window.width,
        config.window.height,
        config.profile
    );

    let event_loop = EventLoop::new()?;
    event_loop.set_control_flow(ControlFlow::Poll);

    let mut app = app::GpuApp::new(state::AppState::new(config));
    event_loop.run_app(&mut app)?;

    Ok(())
}
