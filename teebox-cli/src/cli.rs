//! Entry-point argument parsing, modeled on `sif`'s `Cli { action: Commands, .. }` shape:
//! one subcommand per mode, global flags shared by all of them.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[clap(name = "teebox-cli", about = "Golf launch monitor core: watcher/flight processes and diagnostic modes")]
pub struct Cli {
    #[clap(subcommand)]
    pub mode: Mode,

    /// Path to the main TOML config file.
    #[clap(long, global = true, default_value = "config/teebox.toml")]
    pub config: PathBuf,

    /// Path to an optional machine-local overlay config.
    #[clap(long, global = true)]
    pub overlay: Option<PathBuf>,

    /// `tracing-subscriber` env-filter directive, e.g. `info` or `teebox_cli=debug,fsm=trace`.
    #[clap(long, global = true, default_value = "info")]
    pub log_level: String,

    /// Directory rolling log files are written to, in addition to stderr.
    #[clap(long, global = true)]
    pub log_dir: Option<PathBuf>,

    /// How much diagnostic output to persist: `none`, `overlays`, or `full`.
    #[clap(long, global = true, default_value = "overlays")]
    pub artifact_level: ArtifactLevelArg,

    /// Directory diagnostic PNGs/JPEGs are written to.
    #[clap(long, global = true, default_value = "logs/images")]
    pub image_log_dir: PathBuf,

    /// Override a dotted config path, e.g. `--set cameras.camera1.gain=4.2`. May be repeated.
    #[clap(long = "set", global = true)]
    pub overrides: Vec<String>,

    /// Override the configured simulator host, e.g. `--sim-host gspro=127.0.0.1:921`.
    #[clap(long, global = true)]
    pub sim_host: Vec<String>,

    /// Start in putting mode (shorter stabilization pause, different Hough params).
    #[clap(long, global = true)]
    pub putting: bool,

    /// Run both the watcher and flight FSMs in this one process instead of two.
    #[clap(long, global = true)]
    pub single_process: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum ArtifactLevelArg {
    None,
    Overlays,
    Full,
}

impl From<ArtifactLevelArg> for diagnostics::ArtifactLevel {
    fn from(value: ArtifactLevelArg) -> Self {
        match value {
            ArtifactLevelArg::None => Self::None,
            ArtifactLevelArg::Overlays => Self::Overlays,
            ArtifactLevelArg::Full => Self::Full,
        }
    }
}

#[derive(Subcommand, Debug)]
pub enum Mode {
    /// Run the watcher process (camera 1: ball detection, motion trigger, IPC).
    Camera1,
    /// Run the flight process (camera 2: pre-image, triggered strobed capture, IPC).
    Camera2,
    /// Detect a ball in one fixture image and print the result, without the FSM or IPC.
    Camera1TestStandalone,
    /// Print the detected ball center/radius/confidence for one fixture image.
    Camera1BallLocation,
    /// One-shot camera-1 intrinsics/placement calibration routine.
    Camera1Calibrate,
    /// One-shot camera-2 auto-calibration routine.
    Camera2AutoCalibrate,
    /// Run a throwaway GSPro-protocol TCP listener for local testing.
    TestGsproServer,
    /// Publish a shutdown message onto the IPC bus and exit.
    Shutdown,
    /// Inject a configured list of synthetic shot results with an inter-shot pause.
    SendTestResults {
        #[clap(long, default_value_t = 3)]
        count: u32,
        #[clap(long, default_value_t = 1000)]
        inter_shot_pause_ms: u64,
    },
    /// Exercise the trigger controller's GPIO pulse trains without a camera attached.
    PulseTest,
    /// Replay a fixture teed/strobed image pair through the full watcher+flight pipeline.
    AutomatedTesting,
}
