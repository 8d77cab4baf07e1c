use std::time::Duration;

/// Picks a readable unit for a wall-clock duration, returns (unit, value in that unit).
pub fn elapsed_time(elapsed: Duration) -> (String, f64) {
    let micros = elapsed.as_micros();
    if micros < 1000 {
        (" us".to_string(), micros as f64)
    } else if micros < 1_000_000 {
        (" ms".to_string(), micros as f64 / 1000.0)
    } else if micros < 60_000_000 {
        (" s".to_string(), elapsed.as_secs_f64())
    } else if micros < 3_600_000_000 {
        (" min".to_string(), elapsed.as_secs_f64() / 60.0)
    } else {
        (" h".to_string(), elapsed.as_secs_f64() / 3600.0)
    }
}
