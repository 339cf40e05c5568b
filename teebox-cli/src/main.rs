//! Entry point: deliberately out of scope elsewhere are the command-line entry point,
//! configuration-file parsing, and logging infrastructure, all of which live here instead.
//! Dispatches each mode in [`cli::Mode`] to the crates that actually implement it; this binary
//! owns no vision or timing logic itself.

mod camera;
mod cli;
mod config;
mod error;
mod flight_process;
mod logging;
mod test_gspro_server;
mod time;
mod watcher_process;

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread;
use std::time::Duration;

use ball_detector::{detect, SearchMode};
use clap::Parser;
use crossbeam_channel::{unbounded, Receiver, Sender};
use diagnostics::{Aggregator, ArtifactLevel};
use fsm::{Camera1, Camera2, Command, ControlMessage, Event, FlightFsm, WatcherConfig, WatcherFsm};
use ipc::{command_to_message, message_to_event, IpcBus, IpcMessage, SenderId};
use sim_sink::{all_sinks_armed, E6Sink, GsProSink, SimSink};
use shot_analyzer::analyze;
use tracing::{error, info, warn};
use trigger::TriggerController;

use crate::camera::{FixtureCamera1, FixtureCamera2, VideoCaptureCamera1, VideoCaptureCamera2};
use crate::cli::{Cli, Mode};
use crate::config::{LoadedConfig, SimHosts};
use crate::error::{Error, Result};
use crate::time::now_us;

/// Topic every process publishes to and subscribes on.
const IPC_TOPIC: &str = "Golf.Sim";

fn main() -> miette::Result<()> {
    let cli = Cli::parse();
    let _logging_guard = logging::init(&cli.log_level, cli.log_dir.as_deref());

    if let Err(error) = run(&cli) {
        error!(%error, "teebox-cli: fatal error");
        return Err(error.into());
    }
    Ok(())
}

fn run(cli: &Cli) -> Result<()> {
    match &cli.mode {
        Mode::Camera1 if cli.single_process => run_single_process(cli),
        Mode::Camera1 => run_camera1(cli),
        Mode::Camera2 if cli.single_process => {
            warn!("teebox-cli: --single-process implies both FSMs run under --mode camera1; ignoring --mode camera2");
            Ok(())
        }
        Mode::Camera2 => run_camera2(cli),
        Mode::Camera1TestStandalone => run_camera1_test_standalone(cli),
        Mode::Camera1BallLocation => run_camera1_ball_location(cli),
        Mode::Camera1Calibrate => run_camera1_calibrate(cli),
        Mode::Camera2AutoCalibrate => run_camera2_auto_calibrate(cli),
        Mode::TestGsproServer => run_test_gspro_server(cli),
        Mode::Shutdown => run_shutdown(cli),
        Mode::SendTestResults { count, inter_shot_pause_ms } => run_send_test_results(cli, *count, *inter_shot_pause_ms),
        Mode::PulseTest => run_pulse_test(cli),
        Mode::AutomatedTesting => run_automated_testing(cli),
    }
}

/// Opens the trigger controller's GPIO lines. `init()` must be called before `send_trigger`. Shared by every mode that needs a live strobe/shutter line.
fn open_trigger_controller(loaded: &LoadedConfig) -> Result<Arc<TriggerController<rppal::gpio::OutputPin>>> {
    let controller = Arc::new(TriggerController::new(loaded.trigger.clone()));
    let gpio = rppal::gpio::Gpio::new().map_err(|e| Error::Camera(e.to_string()))?;
    let shutter = gpio
        .get(loaded.trigger.shutter_gpio_pin)
        .map_err(|e| Error::Camera(e.to_string()))?
        .into_output();
    let strobe = gpio
        .get(loaded.trigger.strobe_gpio_pin)
        .map_err(|e| Error::Camera(e.to_string()))?
        .into_output();
    controller.init(shutter, strobe).map_err(|e| Error::Camera(e.to_string()))?;
    Ok(controller)
}

/// Connects every sim sink the loaded config names a host for. Club-change
/// control messages a sink's receiver thread learns about are forwarded onto `club_changes`.
fn connect_sim_sinks(sim_hosts: &SimHosts, device_id: &str, club_changes: Sender<ControlMessage>) -> Result<Vec<Box<dyn SimSink>>> {
    let mut sinks: Vec<Box<dyn SimSink>> = Vec::new();
    if let Some(addr) = &sim_hosts.gspro {
        let sink = GsProSink::connect(addr, device_id, club_changes).map_err(|e| Error::Camera(e.to_string()))?;
        info!(addr, "connected gspro sink");
        sinks.push(Box::new(sink));
    }
    if let Some(addr) = &sim_hosts.e6 {
        let sink = E6Sink::connect(addr).map_err(|e| Error::Camera(e.to_string()))?;
        info!(addr, "connected e6 sink");
        sinks.push(Box::new(sink));
    }
    Ok(sinks)
}

/// Blocks until every configured sink reports armed. Vacuously true with no sinks configured.
fn wait_until_armed(sinks: &[Box<dyn SimSink>]) {
    while !all_sinks_armed(sinks) {
        thread::sleep(Duration::from_millis(200));
    }
}

/// Runs the watcher (camera 1) process against a live rig, talking to the flight process over
/// the IPC bus.
fn run_camera1(cli: &Cli) -> Result<()> {
    let loaded = config::load(cli)?;
    let aggregator = Aggregator::new(&cli.image_log_dir, cli.artifact_level.into());

    let (events_tx, events_rx) = unbounded::<Event>();
    let (results_tx, results_rx) = unbounded();
    let (club_tx, club_rx) = unbounded::<ControlMessage>();
    forward_club_changes(club_rx, events_tx.clone());

    let sinks = connect_sim_sinks(&loaded.sim_hosts, &loaded.device_id, club_tx)?;
    wait_until_armed(&sinks);
    events_tx.send(Event::SimulatorsArmed).ok();
    let sim_sink_handle = watcher_process::spawn_sim_sink_thread(sinks, results_rx);

    let trigger = open_trigger_controller(&loaded)?;
    let live = VideoCaptureCamera1::open(loaded.camera1_device_index, loaded.motion.clone(), trigger, events_tx.clone()).map_err(|e| Error::Camera(e.to_string()))?;
    let poll_handle = live.handle();
    let stop = Arc::new(AtomicBool::new(false));
    let poller = watcher_process::spawn_full_frame_poller(Box::new(poll_handle), events_tx.clone(), Arc::clone(&stop));
    let camera: Box<dyn Camera1> = Box::new(live);

    let watcher_config = loaded.watcher.clone();
    let fsm = WatcherFsm::new(loaded.watcher);

    let bus = IpcBus::open(SenderId("LM_1".to_string()), IPC_TOPIC)?;
    let (outbound_tx, outbound_rx) = unbounded::<IpcMessage>();
    let producer = bus.spawn_producer(outbound_rx);
    let consumer = bus.spawn_consumer(events_tx.clone())?;

    let publish = move |command: Command| -> Result<()> {
        let message = command_to_message(command)?;
        outbound_tx.send(message).map_err(|_| Error::Camera("ipc outbound channel closed".to_string()))
    };

    watcher_process::run_watcher_loop(fsm, camera, events_rx, publish, results_tx, None, &aggregator, &watcher_config)?;

    stop.store(true, Ordering::SeqCst);
    let _ = poller.join();
    let _ = producer.join();
    let _ = consumer.join();
    let _ = sim_sink_handle.join();
    Ok(())
}

/// Runs the flight (camera 2) process against a live rig.
fn run_camera2(cli: &Cli) -> Result<()> {
    let loaded = config::load(cli)?;
    let camera: Box<dyn Camera2> = Box::new(VideoCaptureCamera2::open(loaded.camera2_device_index).map_err(|e| Error::Camera(e.to_string()))?);

    let bus = IpcBus::open(SenderId("LM_2".to_string()), IPC_TOPIC)?;
    let (events_tx, events_rx) = unbounded::<Event>();
    let (outbound_tx, outbound_rx) = unbounded::<IpcMessage>();
    let producer = bus.spawn_producer(outbound_rx);
    let consumer = bus.spawn_consumer(events_tx)?;

    let publish = move |command: Command| -> Result<()> {
        let message = command_to_message(command)?;
        outbound_tx.send(message).map_err(|_| Error::Camera("ipc outbound channel closed".to_string()))
    };

    let fsm = FlightFsm::new();
    flight_process::run_flight_loop(fsm, camera, events_rx, publish, None)?;

    let _ = producer.join();
    let _ = consumer.join();
    Ok(())
}

/// `--mode camera1 --single-process`: both FSMs run in this
/// one process, cross-wired over in-memory channels instead of the `zenoh` bus. `publish`
/// still goes through [`ipc::command_to_message`]/[`ipc::message_to_event`] so the two loops see
/// exactly the same translation a real two-process deployment would apply; only the transport
/// underneath is swapped for a `crossbeam_channel` send.
fn run_single_process(cli: &Cli) -> Result<()> {
    let loaded = config::load(cli)?;
    let aggregator = Aggregator::new(&cli.image_log_dir, cli.artifact_level.into());

    let (watcher_events_tx, watcher_events_rx) = unbounded::<Event>();
    let (flight_events_tx, flight_events_rx) = unbounded::<Event>();
    let (results_tx, results_rx) = unbounded();
    let (club_tx, club_rx) = unbounded::<ControlMessage>();
    forward_club_changes(club_rx, watcher_events_tx.clone());

    let sinks = connect_sim_sinks(&loaded.sim_hosts, &loaded.device_id, club_tx)?;
    wait_until_armed(&sinks);
    watcher_events_tx.send(Event::SimulatorsArmed).ok();
    let sim_sink_handle = watcher_process::spawn_sim_sink_thread(sinks, results_rx);

    let trigger = open_trigger_controller(&loaded)?;
    let live1 = VideoCaptureCamera1::open(loaded.camera1_device_index, loaded.motion.clone(), trigger, watcher_events_tx.clone()).map_err(|e| Error::Camera(e.to_string()))?;
    let poll_handle = live1.handle();
    let stop = Arc::new(AtomicBool::new(false));
    let poller = watcher_process::spawn_full_frame_poller(Box::new(poll_handle), watcher_events_tx.clone(), Arc::clone(&stop));
    let camera1: Box<dyn Camera1> = Box::new(live1);
    let camera2: Box<dyn Camera2> = Box::new(VideoCaptureCamera2::open(loaded.camera2_device_index).map_err(|e| Error::Camera(e.to_string()))?);

    let watcher_config = loaded.watcher.clone();
    let watcher_fsm = WatcherFsm::new(loaded.watcher);
    let flight_fsm = FlightFsm::new();

    let to_flight = flight_events_tx.clone();
    let publish_from_watcher = move |command: Command| -> Result<()> {
        let message = command_to_message(command)?;
        if let Some(event) = message_to_event(message)? {
            to_flight.send(event).map_err(|_| Error::Camera("single-process: flight event channel closed".to_string()))?;
        }
        Ok(())
    };

    let to_watcher = watcher_events_tx.clone();
    let publish_from_flight = move |command: Command| -> Result<()> {
        let message = command_to_message(command)?;
        if let Some(event) = message_to_event(message)? {
            to_watcher.send(event).map_err(|_| Error::Camera("single-process: watcher event channel closed".to_string()))?;
        }
        Ok(())
    };

    let flight_handle = thread::spawn(move || flight_process::run_flight_loop(flight_fsm, camera2, flight_events_rx, publish_from_flight, None));

    watcher_process::run_watcher_loop(watcher_fsm, camera1, watcher_events_rx, publish_from_watcher, results_tx, None, &aggregator, &watcher_config)?;

    flight_events_tx.send(Event::Shutdown).ok();
    stop.store(true, Ordering::SeqCst);
    let _ = poller.join();
    if let Ok(result) = flight_handle.join() {
        result?;
    }
    let _ = sim_sink_handle.join();
    Ok(())
}

fn forward_club_changes(club_rx: Receiver<ControlMessage>, events_tx: Sender<Event>) {
    thread::spawn(move || {
        while let Ok(control) = club_rx.recv() {
            if events_tx.send(Event::Control(control)).is_err() {
                break;
            }
        }
    });
}

/// `--mode camera1_test_standalone`: detects a ball in one fixture image using
/// `PlacedBall` search and prints the result, without standing up the FSM or IPC bus.
fn run_camera1_test_standalone(cli: &Cli) -> Result<()> {
    let loaded = config::load(cli)?;
    let mut camera = FixtureCamera1::new(loaded.launch.require::<String>("golf_sim.testing.teed_image_path")?);
    let image = camera.capture_full_frame().map_err(Error::Camera)?;
    let mode = SearchMode::PlacedBall {
        expected_center_px: loaded.watcher.expected_ball_center_px,
        expected_radius_px: loaded.watcher.expected_ball_radius_px,
    };
    let candidates = detect(&image, &mode, &loaded.watcher.search_params)?;
    println!("{} candidate(s) found", candidates.len());
    for candidate in &candidates {
        println!(
            "  x={:.1} y={:.1} r={:.1} confidence={:.2}",
            candidate.x_px, candidate.y_px, candidate.r_px, candidate.confidence
        );
    }
    Ok(())
}

/// `--mode camera1_ball_location`: prints just the top candidate's center/radius/
/// confidence, for quick rig alignment checks.
fn run_camera1_ball_location(cli: &Cli) -> Result<()> {
    let loaded = config::load(cli)?;
    let mut camera = FixtureCamera1::new(loaded.launch.require::<String>("golf_sim.testing.teed_image_path")?);
    let image = camera.capture_full_frame().map_err(Error::Camera)?;
    let mode = SearchMode::PlacedBall {
        expected_center_px: loaded.watcher.expected_ball_center_px,
        expected_radius_px: loaded.watcher.expected_ball_radius_px,
    };
    match detect(&image, &mode, &loaded.watcher.search_params)?.into_iter().next() {
        Some(ball) => println!("x={:.1} y={:.1} r={:.1} confidence={:.2}", ball.x_px, ball.y_px, ball.r_px, ball.confidence),
        None => println!("no ball found"),
    }
    Ok(())
}

/// `--mode camera1_calibrate`: locates the
/// placed ball in a fixture image and reports the distance the currently configured camera-1
/// intrinsics would derive for it, so an operator can compare against a measured distance and
/// adjust the checked-in intrinsics table (intrinsics are loaded per model/resolution).
fn run_camera1_calibrate(cli: &Cli) -> Result<()> {
    let loaded = config::load(cli)?;
    let mut camera = FixtureCamera1::new(loaded.launch.require::<String>("golf_sim.testing.teed_image_path")?);
    let image = camera.capture_full_frame().map_err(Error::Camera)?;
    let mode = SearchMode::PlacedBall {
        expected_center_px: loaded.watcher.expected_ball_center_px,
        expected_radius_px: loaded.watcher.expected_ball_radius_px,
    };
    let ball = detect(&image, &mode, &loaded.watcher.search_params)?
        .into_iter()
        .next()
        .ok_or_else(|| Error::Camera("camera1_calibrate: no ball found in calibration image".to_string()))?;
    let intrinsics = loaded.watcher.analyzer.camera1_intrinsics;
    let distance_m = geometry::ball_distance_from_radius(ball.r_px, intrinsics.fx).map_err(|e| Error::Camera(e.to_string()))?;
    println!(
        "camera1: ball at x={:.1} y={:.1} r={:.1} -> estimated distance {:.3} m (fx={:.1})",
        ball.x_px, ball.y_px, ball.r_px, distance_m, intrinsics.fx
    );
    Ok(())
}

/// `--mode camera2_auto_calibrate`: same report for camera 2's configured intrinsics against
/// its own fixture strobed image.
fn run_camera2_auto_calibrate(cli: &Cli) -> Result<()> {
    let loaded = config::load(cli)?;
    let mut camera = FixtureCamera2::new(
        loaded.launch.require::<String>("golf_sim.testing.pre_image_path")?,
        loaded.launch.require::<String>("golf_sim.testing.strobed_image_path")?,
    );
    let image = camera.capture_triggered_image().map_err(Error::Camera)?;
    let mode = SearchMode::StrobedBall {
        expected_radius_px: loaded.watcher.expected_ball_radius_px,
    };
    let candidates = detect(&image, &mode, &loaded.watcher.analyzer.strobed_ball_params)?;
    let intrinsics = loaded.watcher.analyzer.camera2_intrinsics;
    println!("camera2: {} candidate(s), fx={:.1} fy={:.1}", candidates.len(), intrinsics.fx, intrinsics.fy);
    for ball in &candidates {
        let distance_m = geometry::ball_distance_from_radius(ball.r_px, intrinsics.fx).map_err(|e| Error::Camera(e.to_string()))?;
        println!("  x={:.1} y={:.1} r={:.1} -> {:.3} m", ball.x_px, ball.y_px, ball.r_px, distance_m);
    }
    Ok(())
}

fn run_test_gspro_server(cli: &Cli) -> Result<()> {
    let loaded = config::load(cli)?;
    let addr = loaded.sim_hosts.gspro.unwrap_or_else(|| "0.0.0.0:921".to_string());
    test_gspro_server::run(&addr)
}

/// `--mode shutdown`: publishes `kShutdown` onto the bus and exits; every running
/// process's waiting-state loop picks it up and tears down cooperatively.
fn run_shutdown(_cli: &Cli) -> Result<()> {
    let bus = IpcBus::open(SenderId("LM_CLI".to_string()), IPC_TOPIC)?;
    let (outbound_tx, outbound_rx) = unbounded();
    let producer = bus.spawn_producer(outbound_rx);
    outbound_tx.send(IpcMessage::Shutdown).ok();
    drop(outbound_tx);
    let _ = producer.join();
    Ok(())
}

/// `--mode send_test_results --count N --inter-shot-pause-ms P`: sends synthetic shot
/// results through the configured sink(s) at a fixed pace, for exercising the sim-facing
/// wire protocol without a live rig.
fn run_send_test_results(cli: &Cli, count: u32, inter_shot_pause_ms: u64) -> Result<()> {
    let loaded = config::load(cli)?;
    let (club_tx, _club_rx) = unbounded();
    let mut sinks = connect_sim_sinks(&loaded.sim_hosts, &loaded.device_id, club_tx)?;
    if !sinks.is_empty() {
        wait_until_armed(&sinks);
    }

    let aggregator = Aggregator::new(&cli.image_log_dir, ArtifactLevel::None);
    let template = shot_analyzer::ShotAnalysis {
        calibration_ball: sample_analyzed_ball(),
        in_flight_balls: vec![sample_analyzed_ball(), sample_analyzed_ball()],
        hla_deg: 1.5,
        vla_deg: 13.2,
        velocity_mps: 68.0,
        time_base_us: 5000,
        rotation_deg: spin_solver::EulerDeg { rx: 600.0, ry: -20.0, rz: 0.0 },
        rotation_rpm: spin_solver::EulerDeg { rx: 2600.0, ry: -120.0, rz: 0.0 },
        spin_confidence: 0.8,
    };

    for _ in 0..count {
        let result = aggregator.compose_result(&template, shot_analyzer::ClubType::Driver);
        info!(shot_number = result.shot_number, "send_test_results: injecting synthetic shot");
        for sink in sinks.iter_mut() {
            if let Err(error) = sink.send_result(&result) {
                warn!(sink = sink.name(), %error, "send_test_results: failed to send");
            }
        }
        thread::sleep(Duration::from_millis(inter_shot_pause_ms));
    }
    Ok(())
}

fn sample_analyzed_ball() -> shot_analyzer::AnalyzedBall {
    shot_analyzer::AnalyzedBall {
        position: ball_detector::BallPosition::new(0.0, 0.0, 10.0, 0.9, 0, ball_detector::MethodTag::Synthetic).expect("valid synthetic ball"),
        camera_distance_m: 2.0,
        angular_delta: shot_analyzer::AngularDelta::default(),
        rotation_deg: spin_solver::EulerDeg::ZERO,
        rotation_rpm: spin_solver::EulerDeg::ZERO,
        spin_confidence: 0.8,
        velocity_mps: 68.0,
        diagnostics: shot_analyzer::BallDiagnostics::default(),
    }
}

/// `--mode pulse_test`: exercises the trigger
/// controller in isolation, with no camera attached.
fn run_pulse_test(cli: &Cli) -> Result<()> {
    let loaded = config::load(cli)?;
    let controller = open_trigger_controller(&loaded)?;
    controller.send_priming_pulses(false).map_err(|e| Error::Camera(e.to_string()))?;
    let start = std::time::Instant::now();
    controller.send_trigger().map_err(|e| Error::Camera(e.to_string()))?;
    info!(elapsed_us = start.elapsed().as_micros(), "pulse_test: trigger cycle complete");
    Ok(())
}

/// `--mode automated_testing`: replays one configured still-image triple through the shot
/// analyzer directly, without the FSM or IPC bus, and prints the resulting
/// [`shot_analyzer::ShotResult`].
fn run_automated_testing(cli: &Cli) -> Result<()> {
    let loaded = config::load(cli)?;
    let mut camera1 = FixtureCamera1::new(loaded.launch.require::<String>("golf_sim.testing.teed_image_path")?);
    let mut camera2 = FixtureCamera2::new(
        loaded.launch.require::<String>("golf_sim.testing.pre_image_path")?,
        loaded.launch.require::<String>("golf_sim.testing.strobed_image_path")?,
    );

    let teed_image = camera1.capture_full_frame().map_err(Error::Camera)?;
    let pre_image = camera2.capture_pre_image().map_err(Error::Camera)?;
    let strobed_image = camera2.capture_triggered_image().map_err(Error::Camera)?;

    let analysis = analyze(&teed_image, &strobed_image, &pre_image, &loaded.watcher.analyzer, None)?;
    let result = analysis.to_shot_result(1, shot_analyzer::ClubType::Driver);
    println!(
        "speed={:.1} mph vla={:.1} hla={:.1} back_spin={:.0} side_spin={:.0} club={:?}",
        result.speed_mph, result.vla_deg, result.hla_deg, result.back_spin_rpm, result.side_spin_rpm, result.club_type
    );
    Ok(())
}
