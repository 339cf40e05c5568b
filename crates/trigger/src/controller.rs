use std::sync::Mutex;

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::error::{Error, Result};
use crate::gpio::{busy_wait_pulse, GpioPin};
use crate::plan::PulsePlan;

/// Static configuration for a [`TriggerController`]: which GPIO lines to drive and the pulse
/// trains to emit on them.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TriggerConfig {
    pub shutter_gpio_pin: u8,
    pub strobe_gpio_pin: u8,
    pub shutter_pulse_us: u32,
    pub strobe_pulse_plan: PulsePlan,
    pub priming_pulse_plan: PulsePlan,
    pub priming_pulse_plan_high_fps: PulsePlan,
}

struct Pins<P: GpioPin> {
    shutter: P,
    strobe: P,
}

/// Owns the camera-2 shutter line and strobe illumination line. Both lines are driven through
/// a single internal mutex so `send_trigger` and `send_priming_pulses` can never race each
/// other onto the same wires: the GPIO pins used by the trigger controller are mutexed.
pub struct TriggerController<P: GpioPin> {
    config: TriggerConfig,
    pins: Mutex<Option<Pins<P>>>,
}

impl<P: GpioPin> TriggerController<P> {
    pub fn new(config: TriggerConfig) -> Self {
        Self {
            config,
            pins: Mutex::new(None),
        }
    }

    /// Configure the GPIO lines. Must be called before [`Self::send_trigger`] or
    /// [`Self::send_priming_pulses`].
    pub fn init(&self, mut shutter: P, mut strobe: P) -> Result<()> {
        let mut guard = self.pins.lock().expect("trigger mutex poisoned");
        if guard.is_some() {
            return Err(Error::AlreadyInitialized);
        }
        shutter.set_low();
        strobe.set_low();
        *guard = Some(Pins { shutter, strobe });
        info!("trigger controller initialized");
        Ok(())
    }

    pub fn deinit(&self) -> Result<()> {
        let mut guard = self.pins.lock().expect("trigger mutex poisoned");
        if guard.take().is_none() {
            return Err(Error::NotInitialized);
        }
        Ok(())
    }

    /// Emit a short warm-up train on the strobe line so the downstream camera/strobe can settle
    /// before the real trigger arrives. Selects the high-fps or standard plan.
    pub fn send_priming_pulses(&self, high_fps_mode: bool) -> Result<()> {
        let plan = if high_fps_mode {
            &self.config.priming_pulse_plan_high_fps
        } else {
            &self.config.priming_pulse_plan
        };
        let mut guard = self.pins.lock().expect("trigger mutex poisoned");
        let pins = guard.as_mut().ok_or(Error::NotInitialized)?;
        debug!(pulses = plan.pulse_count(), high_fps_mode, "sending priming pulses");
        for interval in &plan.intervals {
            busy_wait_pulse(&mut pins.strobe, interval.high_us, interval.low_us);
        }
        Ok(())
    }

    /// Emit exactly one shutter-line pulse, then the configured strobe train. Called
    /// synchronously from the motion-detection hot path the instant motion is confirmed.
    pub fn send_trigger(&self) -> Result<()> {
        let mut guard = self.pins.lock().expect("trigger mutex poisoned");
        let pins = guard.as_mut().ok_or(Error::NotInitialized)?;

        pins.shutter.set_high();
        busy_wait_pulse(&mut pins.shutter, self.config.shutter_pulse_us, 0);

        debug!(pulses = self.config.strobe_pulse_plan.pulse_count(), "sending strobe train");
        for interval in &self.config.strobe_pulse_plan.intervals {
            busy_wait_pulse(&mut pins.strobe, interval.high_us, interval.low_us);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gpio::RecordingPin;
    use crate::plan::PulseInterval;

    fn plan(n: usize) -> PulsePlan {
        PulsePlan::new((0..n).map(|_| PulseInterval { high_us: 10, low_us: 10 }).collect()).unwrap()
    }

    fn config() -> TriggerConfig {
        TriggerConfig {
            shutter_gpio_pin: 17,
            strobe_gpio_pin: 27,
            shutter_pulse_us: 20,
            strobe_pulse_plan: plan(3),
            priming_pulse_plan: plan(2),
            priming_pulse_plan_high_fps: plan(4),
        }
    }

    #[test]
    fn send_trigger_fails_before_init() {
        let controller: TriggerController<RecordingPin> = TriggerController::new(config());
        assert!(controller.send_trigger().is_err());
    }

    #[test]
    fn send_trigger_requires_init_first() {
        let controller = TriggerController::new(config());
        controller.init(RecordingPin::new(), RecordingPin::new()).unwrap();
        assert!(controller.send_trigger().is_ok());
    }

    #[test]
    fn double_init_is_rejected() {
        let controller = TriggerController::new(config());
        controller.init(RecordingPin::new(), RecordingPin::new()).unwrap();
        assert!(controller.init(RecordingPin::new(), RecordingPin::new()).is_err());
    }
}
