mod script;

use clap::{Parser, Subcommand};
use spinview_camera::{FrameMatrices, MovementKeys, ViewRig};
use spinview_common::{ProjectionProfile, ViewerConfig};
use spinview_render::{DebugTextRenderer, DrawVariant, MatrixSlot, RecordingUploader, upload_frame};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "spinview-cli", about = "Headless spinview camera and transform tool")]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    /// Config file (YAML or JSON)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print crate versions and default parameters
    Info,
    /// Simulate idle frames and print the last frame's matrices
    Frames {
        /// Number of frames to run
        #[arg(short = 'n', long, default_value = "1")]
        count: u64,
        /// Seconds between frames
        #[arg(long, default_value = "0.016")]
        dt: f32,
        /// Viewport aspect ratio (defaults to the configured window)
        #[arg(short, long)]
        aspect: Option<f32>,
        /// Far-plane profile: standard (200) or short (100)
        #[arg(short, long)]
        profile: Option<ProjectionProfile>,
        /// Also list the per-variant uniform uploads
        #[arg(long)]
        uploads: bool,
    },
    /// Replay a JSON input script and print the final state
    Replay {
        /// Path to the script
        script: PathBuf,
    },
    /// Print the effective configuration as YAML
    Config,
}

fn print_uploads(frame: &FrameMatrices) {
    let mut recorder = RecordingUploader::new();
    upload_frame(&mut recorder, frame);
    for variant in DrawVariant::ALL {
        for slot in MatrixSlot::ALL {
            if let Some(m) = recorder.latest(variant, slot) {
                println!(
                    "{variant:?} slot {} ({slot:?}): {:?}",
                    slot.binding(),
                    m.to_cols_array()
                );
            }
        }
    }
}

fn check_frame_args(count: u64, dt: f32, aspect: f32) -> anyhow::Result<()> {
    anyhow::ensure!(count > 0, "frame count must be at least 1");
    anyhow::ensure!(
        dt.is_finite() && dt >= 0.0,
        "dt must be a non-negative number, got {dt}"
    );
    anyhow::ensure!(
        aspect.is_finite() && aspect > 0.0,
        "aspect ratio must be positive, got {aspect}"
    );
    Ok(())
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(filter))
        .init();

    let mut config = ViewerConfig::load_or_default(cli.config.as_deref())?;

    match cli.command {
        Commands::Info => {
            let defaults = ViewRig::from_config(&config);
            println!("spinview-cli v{}", env!("CARGO_PKG_VERSION"));
            println!("render: {}", spinview_render::crate_info());
            println!(
                "window: {}x{} (aspect {:.4})",
                config.window.width,
                config.window.height,
                config.window.aspect()
            );
            println!(
                "projection: fov={} near={} far={} ({})",
                defaults.projection.fov_y_degrees,
                defaults.projection.near,
                defaults.projection.far,
                config.profile
            );
            println!(
                "camera: speed={} sensitivity={} yaw={} pitch={}",
                defaults.camera.speed,
                defaults.sensitivity,
                defaults.camera.yaw,
                defaults.camera.pitch
            );
            println!(
                "spin: pivot={} per-frame={}",
                defaults.model.pivot, defaults.model.per_frame
            );
        }
        Commands::Frames {
            count,
            dt,
            aspect,
            profile,
            uploads,
        } => {
            if let Some(profile) = profile {
                config.profile = profile;
            }
            let aspect = aspect.unwrap_or_else(|| config.window.aspect());
            check_frame_args(count, dt, aspect)?;

            let mut rig = ViewRig::from_config(&config);
            let mut last = FrameMatrices::default();
            for i in 1..=count {
                last = rig.frame(i as f32 * dt, MovementKeys::default(), aspect);
            }
            tracing::info!("simulated {count} frames at dt={dt}");

            print!("{}", DebugTextRenderer::new().render(&rig.camera, &last));
            if uploads {
                print_uploads(&last);
            }
        }
        Commands::Replay { script: path } => {
            let script = script::Script::load(&path)?;
            let mut rig = ViewRig::from_config(&config);
            match script.run(&mut rig) {
                Some(last) => print!("{}", DebugTextRenderer::new().render(&rig.camera, &last)),
                None => println!("script has no frames"),
            }
        }
        Commands::Config => {
            print!("{}", config.to_yaml()?);
        }
    }

    Ok(())
}
