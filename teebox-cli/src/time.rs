use std::time::{SystemTime, UNIX_EPOCH};

/// Wall-clock microseconds, used to timestamp polled frames and to drive the FSMs'
/// `now_us` parameter outside of tests.
pub fn now_us() -> u64 {
    SystemTime::now().duration_since(UNIX_EPOCH).expect("system clock before epoch").as_micros() as u64
}
