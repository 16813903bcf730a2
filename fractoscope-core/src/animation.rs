//! Periodic parameter animation.
//!
//! The event loop is single-threaded, so the timer is a schedule the loop
//! polls rather than a thread firing callbacks. [`Interval`] owns the one
//! schedule that may exist; a second `start` while it is running is an
//! error, and after [`Interval::cancel`] no further tick is ever reported.

use std::time::{Duration, Instant, SystemTime, UNIX_EPOCH};

use tracing::debug;

use crate::complex::Complex;
use crate::error::CoreError;

/// Default tick period of the auto-animation.
pub const DEFAULT_PERIOD: Duration = Duration::from_millis(50);

/// `(a, b)` at wall-clock time `t` seconds.
#[inline]
pub fn auto_params(t: f64) -> Complex {
    Complex::new((t * 0.5).sin() * 0.5, (t * 0.3).cos() * 0.5)
}

/// Seconds since the UNIX epoch, as the animation's time base.
pub fn wall_clock_seconds() -> f64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs_f64())
        .unwrap_or(0.0)
}

#[derive(Debug, Clone, Copy)]
struct Schedule {
    period: Duration,
    next_due: Instant,
}

/// A cancellable fixed-period schedule with at most one instance running.
#[derive(Debug, Default)]
pub struct Interval {
    schedule: Option<Schedule>,
}

impl Interval {
    pub fn new() -> Self {
        Self::default()
    }

    /// Begin ticking every `period`, first tick one period after `now`.
    pub fn start(&mut self, period: Duration, now: Instant) -> crate::Result<()> {
        if self.schedule.is_some() {
            return Err(CoreError::TimerActive);
        }
        if period.is_zero() {
            return Err(CoreError::InvalidPeriod(period));
        }
        self.schedule = Some(Schedule {
            period,
            next_due: now + period,
        });
        debug!(period_ms = period.as_millis() as u64, "Interval started");
        Ok(())
    }

    /// Stop ticking. Returns `false` if nothing was running.
    pub fn cancel(&mut self) -> bool {
        let was_active = self.schedule.take().is_some();
        if was_active {
            debug!("Interval cancelled");
        }
        was_active
    }

    pub fn is_active(&self) -> bool {
        self.schedule.is_some()
    }

    /// Fire at most one tick if one is due at `now`.
    ///
    /// When the loop fell behind by several periods the missed ticks are
    /// coalesced into this one and the next deadline is realigned to the
    /// period grid.
    pub fn poll(&mut self, now: Instant) -> bool {
        let Some(schedule) = self.schedule.as_mut() else {
            return false;
        };
        if now < schedule.next_due {
            return false;
        }
        // Next deadline is the first grid point strictly after `now`.
        let behind = now.duration_since(schedule.next_due);
        let into_period = behind.as_nanos() % schedule.period.as_nanos();
        let into_period = Duration::from_nanos(u64::try_from(into_period).unwrap_or(u64::MAX));
        schedule.next_due = now + schedule.period.saturating_sub(into_period);
        true
    }

    /// Time left until the next tick, `None` when idle.
    pub fn time_until_next(&self, now: Instant) -> Option<Duration> {
        self.schedule
            .map(|s| s.next_due.saturating_duration_since(now))
    }
}
