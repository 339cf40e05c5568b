//! Assembles every per-mode frozen parameter block teebox-cli needs from one [`LaunchConfig`].
//! The config store is process-wide, read-mostly, initialized at startup and frozen thereafter.
//! `--set`/`--sim-host`/`--putting` are applied here, before anything downstream ever sees a
//! config value, so the rest of the process only ever reads a frozen tree.

use ball_detector::HoughParams;
use fsm::WatcherConfig;
use launch_config::LaunchConfig;
use motion_detect::MotionDetectConfig;
use shot_analyzer::AnalyzerConfig;
use trigger::TriggerConfig;

use crate::cli::Cli;
use crate::error::{Error, Result};

/// Simulator addresses this run should connect to, keyed by protocol name. GSPro
/// and E6 are both optional, either or both may be configured.
#[derive(Debug, Clone, Default)]
pub struct SimHosts {
    pub gspro: Option<String>,
    pub e6: Option<String>,
}

pub struct LoadedConfig {
    pub launch: LaunchConfig,
    pub watcher: WatcherConfig,
    pub trigger: TriggerConfig,
    pub motion: MotionDetectConfig,
    pub sim_hosts: SimHosts,
    pub device_id: String,
    pub camera1_device_index: i32,
    pub camera2_device_index: i32,
}

/// Applies every `--set key.path=value` and `--sim-host sink=host:port` override, then
/// resolves the per-module config blocks each crate owns its own typed section for.
pub fn load(cli: &Cli) -> Result<LoadedConfig> {
    let mut launch = LaunchConfig::load(&cli.config, cli.overlay.as_ref())?;

    for raw in &cli.overrides {
        let (path, value) = raw.split_once('=').ok_or_else(|| Error::InvalidOverride {
            raw: raw.clone(),
            reason: "expected `key.path=value`".to_string(),
        })?;
        launch.set_override(path, value)?;
    }

    for raw in &cli.sim_host {
        let (sink, addr) = raw.split_once('=').ok_or_else(|| Error::InvalidOverride {
            raw: raw.clone(),
            reason: "expected `sink=host:port`".to_string(),
        })?;
        launch.set_override(&format!("golf_sim.sim_sinks.{sink}.address"), addr)?;
    }

    if cli.putting {
        launch.set_override("golf_sim.ball.putting", "true")?;
    }

    let analyzer: AnalyzerConfig = launch.require("golf_sim.analyzer")?;

    let watcher = WatcherConfig {
        search_params: launch.require::<HoughParams>("golf_sim.camera1.search_params")?,
        expected_ball_center_px: analyzer.expected_ball_center_px,
        expected_ball_radius_px: analyzer.expected_ball_radius_px,
        stabilization_duration_us: launch.get_or(
            "golf_sim.ball.stabilization_duration_us",
            if cli.putting { 150_000 } else { 500_000 },
        ),
        stabilization_tolerance_px: launch.get_or("golf_sim.ball.stabilization_tolerance_px", 3.0),
        analyzer,
    };

    let trigger = launch.require::<TriggerConfig>("golf_sim.trigger")?;
    let motion = launch.require::<MotionDetectConfig>("golf_sim.camera1.motion")?;

    let sim_hosts = SimHosts {
        gspro: launch.get::<String>("golf_sim.sim_sinks.gspro.address"),
        e6: launch.get::<String>("golf_sim.sim_sinks.e6.address"),
    };

    Ok(LoadedConfig {
        device_id: launch.get_or("golf_sim.sim_sinks.gspro.device_id", "teebox-1".to_string()),
        camera1_device_index: launch.get_or("golf_sim.camera1.device_index", 0),
        camera2_device_index: launch.get_or("golf_sim.camera2.device_index", 1),
        watcher,
        trigger,
        motion,
        sim_hosts,
        launch,
    })
}
