//! Countdown and regeneration timing
//!
//! Pure functions behind the refresh tick: where the countdown indicator is
//! and whether displayed codes must be regenerated.

/// OTP time step in seconds
pub const STEP_SECS: u64 = 30;

/// Perimeter of the countdown ring (r = 10)
pub const RING_PERIMETER: f64 = 62.83;

/// `remaining` at or above this means a cycle just started
pub const FRESH_CYCLE_THRESHOLD: f64 = 29.9;

/// Seconds left in the current step, in (0, 30]
///
/// # Examples
/// ```
/// use authtui::logic::countdown::remaining_secs;
///
/// assert_eq!(remaining_secs(60.0), 30.0);
/// assert_eq!(remaining_secs(75.0), 15.0);
/// assert!((remaining_secs(89.9) - 0.1).abs() < 1e-9);
/// ```
pub fn remaining_secs(now_secs: f64) -> f64 {
    let step = STEP_SECS as f64;
    step - now_secs.rem_euclid(step)
}

/// Stroke progress along the ring for the remaining time
pub fn ring_progress(remaining: f64) -> f64 {
    (remaining / STEP_SECS as f64) * RING_PERIMETER
}

/// Dash offset that leaves `ring_progress` of the ring drawn
pub fn ring_dash_offset(remaining: f64) -> f64 {
    RING_PERIMETER - ring_progress(remaining)
}

/// Fraction of the step left, for gauge-style indicators
pub fn gauge_ratio(remaining: f64) -> f64 {
    (remaining / STEP_SECS as f64).clamp(0.0, 1.0)
}

/// Index of the 30 s step containing an epoch second
pub fn step_index(epoch_secs: u64) -> u64 {
    epoch_secs / STEP_SECS
}

/// Outcome of one tick
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TickDecision {
    pub remaining: f64,
    pub epoch: u64,
    pub regenerate: bool,
}

/// Decide whether this tick regenerates codes
///
/// Regenerates when nothing was recorded yet, when the step index has
/// advanced past the last recorded epoch's step (catches ticks that were
/// delayed across a whole boundary), or when a fresh cycle starts in a step
/// other than the recorded one (catches the clock moving backwards).
pub fn decide(now_secs: f64, last_epoch: Option<u64>) -> TickDecision {
    let remaining = remaining_secs(now_secs);
    let epoch = now_secs.max(0.0).floor() as u64;

    let regenerate = match last_epoch {
        None => true,
        Some(last) => {
            let advanced = step_index(epoch) > step_index(last);
            let fresh_cycle = remaining >= FRESH_CYCLE_THRESHOLD && step_index(epoch) != step_index(last);
            advanced || fresh_cycle
        }
    };

    TickDecision {
        remaining,
        epoch,
        regenerate,
    }
}
