use rand::Rng;
use std::time::Duration;

/// Highest exponent applied to the base delay.
const MAX_EXPONENT: u32 = 4;

/// Exponential backoff with ±30% jitter: `base * 2^retry`.
///
/// `retry` is zero for the wait after the first failed attempt.
pub fn calculate_backoff_delay(retry: u32, base: Duration) -> Duration {
    let factor = 2_u32.saturating_pow(retry.min(MAX_EXPONENT));
    let delay = base.saturating_mul(factor);

    let jitter_factor = rand::thread_rng().gen_range(0.7..1.3);
    delay.mul_f64(jitter_factor)
}
