//! Wires the watcher (camera 1) half of the pipeline together: the full-frame poll loop
//! `fsm::WatcherFsm` needs externally (the FSM only ever consumes `Event::Frame`, it never
//! calls [`fsm::Camera1::capture_full_frame`] itself), the FSM step loop, the sim-sink dispatch
//! loop, and diagnostic overlay persistence.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::Duration;

use ball_detector::{detect, ImageBuffer, SearchMode};
use crossbeam_channel::{Receiver, RecvTimeoutError, Sender};
use diagnostics::{report_status, Aggregator};
use fsm::{Camera1, Command, Event, Status, WatcherConfig, WatcherFsm};
use shot_analyzer::ShotResult;
use sim_sink::SimSink;
use tracing::{info, warn};

use crate::error::Result;
use crate::time::now_us;

/// Continuously polls `camera.capture_full_frame()` and pushes `Event::Frame`. Safe to run
/// unconditionally regardless of FSM state: the FSM's catch-all match arm drops any event it
/// doesn't expect, logging a warning rather than erroring.
pub fn spawn_full_frame_poller(mut camera: Box<dyn Camera1>, events: Sender<Event>, stop: Arc<AtomicBool>) -> JoinHandle<()> {
    thread::spawn(move || {
        while !stop.load(Ordering::SeqCst) {
            match camera.capture_full_frame() {
                Ok(frame) => {
                    if events.send(Event::Frame(frame)).is_err() {
                        break;
                    }
                }
                Err(error) => warn!(%error, "watcher: full-frame poll failed"),
            }
        }
    })
}

/// Tracks the last image seen of each kind purely for diagnostic overlays: the watcher FSM's
/// internal shot analysis is not exposed outside `fsm::watcher::step`, so overlays are produced
/// independently here by re-running `ball_detector::detect` against the same frames the FSM
/// just consumed.
#[derive(Default)]
struct LastImages {
    teed: Option<ImageBuffer>,
    pre: Option<ImageBuffer>,
    strobed: Option<ImageBuffer>,
}

/// Runs the watcher FSM's event loop to completion (until a `Shutdown` event or the event
/// channel closes). `publish` sends a [`Command`] onward — over IPC in two-process mode, or
/// straight into the flight loop's event channel in `--single-process` mode.
#[allow(clippy::too_many_arguments)]
pub fn run_watcher_loop(
    mut fsm: WatcherFsm,
    mut camera: Box<dyn Camera1>,
    events: Receiver<Event>,
    mut publish: impl FnMut(Command) -> Result<()>,
    results: Sender<ShotResult>,
    ui_status: Option<Sender<Status>>,
    aggregator: &Aggregator,
    config: &WatcherConfig,
) -> Result<()> {
    let mut last = LastImages::default();

    loop {
        let event = match events.recv_timeout(Duration::from_millis(500)) {
            Ok(event) => event,
            Err(RecvTimeoutError::Timeout) => continue,
            Err(RecvTimeoutError::Disconnected) => {
                info!("watcher: event channel closed, stopping");
                return Ok(());
            }
        };

        match &event {
            Event::Frame(image) => last.teed = Some(image.clone()),
            Event::Camera2PreImage(image) => last.pre = Some(image.clone()),
            Event::Camera2Image(image) => last.strobed = Some(image.clone()),
            _ => {}
        }

        let outcome = fsm.step(event, camera.as_mut(), now_us())?;

        if let Some(status) = &outcome.status {
            report_status(status, ui_status.as_ref());
        }

        for command in outcome.commands {
            if let Command::PublishResult(result) = &command {
                save_shot_diagnostics(aggregator, config, result.shot_number, &last);
                if results.send(result.clone()).is_err() {
                    warn!("watcher: sim sink result channel closed");
                }
            }
            publish(command)?;
        }

        if outcome.shutdown {
            info!("watcher: shutdown requested");
            return Ok(());
        }
    }
}

fn save_shot_diagnostics(aggregator: &Aggregator, config: &WatcherConfig, shot_number: u32, last: &LastImages) {
    if let Some(pre) = &last.pre {
        if let Err(error) = aggregator.save_pre_image(pre) {
            warn!(%error, "watcher: failed to save pre-image overlay");
        }
    }
    if let Some(teed) = &last.teed {
        let mode = SearchMode::PlacedBall {
            expected_center_px: config.expected_ball_center_px,
            expected_radius_px: config.expected_ball_radius_px,
        };
        let candidates = detect(teed, &mode, &config.analyzer.placed_ball_params).unwrap_or_default();
        if let Err(error) = aggregator.save_teed_overlay(shot_number, teed, &candidates) {
            warn!(%error, "watcher: failed to save teed overlay");
        }
    }
    if let Some(strobed) = &last.strobed {
        let mode = SearchMode::StrobedBall {
            expected_radius_px: config.expected_ball_radius_px,
        };
        let candidates = detect(strobed, &mode, &config.analyzer.strobed_ball_params).unwrap_or_default();
        if let Err(error) = aggregator.save_strobed_overlay(shot_number, strobed, &candidates) {
            warn!(%error, "watcher: failed to save strobed overlay");
        }
    }
}

/// Connects every configured simulator sink and runs the dispatch loop on its own thread.
pub fn spawn_sim_sink_thread(sinks: Vec<Box<dyn SimSink>>, results: Receiver<ShotResult>) -> JoinHandle<()> {
    thread::spawn(move || sim_sink::run_dispatch_loop(results, sinks))
}
