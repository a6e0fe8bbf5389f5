//! Release velocity from the sample history.
//!
//! Averages the instantaneous rate of every adjacent sample pair rather than
//! taking one endpoint-to-endpoint rate, which damps sampling jitter.

use super::samples::SampleBuffer;

/// Signed horizontal velocity in px/s (positive = rightward).
///
/// Returns 0.0 with fewer than two samples. Pairs sharing a timestamp (or
/// running backwards) are skipped; if no pair is usable the result is 0.0.
pub fn velocity(buffer: &SampleBuffer) -> f64 {
    if buffer.len() < 2 {
        return 0.0;
    }

    let mut sum = 0.0;
    let mut count = 0usize;
    let older = buffer.iter();
    let newer = buffer.iter().skip(1);
    for (prev, curr) in older.zip(newer) {
        let dt = curr.time_ms - prev.time_ms;
        if !(dt > 0.0) {
            continue;
        }
        let v = (curr.x - prev.x) / (dt / 1000.0);
        if !v.is_finite() {
            continue;
        }
        sum += v;
        count += 1;
    }

    if count == 0 {
        return 0.0;
    }
    sum / count as f64
}
