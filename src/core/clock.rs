//! Simulation time and the cooldown primitive every timed rule is built on.
//!
//! Nothing in the simulation reads wall-clock time. A single [`SimClock`]
//! resource is advanced once per frame and its `now` is passed explicitly to
//! every [`Cooldown`] check, which keeps whole runs replayable from tests.

use std::time::Duration;

use bevy::prelude::*;

/// Monotonic simulation clock.
#[derive(Resource, Debug, Clone, Copy, Default)]
pub struct SimClock {
    /// Time elapsed since the simulation started.
    pub now: Duration,
    /// Number of frames simulated so far.
    pub frame: u64,
}

impl SimClock {
    pub fn advance(&mut self, delta: Duration) {
        self.now += delta;
        self.frame += 1;
    }
}

/// Advance the simulation clock from Bevy's frame delta.
pub fn advance_clock(time: Res<Time>, mut clock: ResMut<SimClock>) {
    clock.advance(time.delta());
}

/// Countdown that fires at most once per elapsed `delay` window.
///
/// A fresh cooldown is ready immediately. [`Cooldown::started`] builds one
/// whose first window begins at a given instant instead, which is what
/// scheduled one-shot actions (despawn, pickup delay) want.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Cooldown {
    last_fire: Option<Duration>,
    delay: Duration,
}

impl Cooldown {
    pub fn new(delay: Duration) -> Self {
        Self {
            last_fire: None,
            delay,
        }
    }

    pub fn from_millis(millis: u64) -> Self {
        Self::new(Duration::from_millis(millis))
    }

    /// A cooldown whose first window starts at `now`.
    pub fn started(now: Duration, delay: Duration) -> Self {
        Self {
            last_fire: Some(now),
            delay,
        }
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }

    /// Time since the last reset, or `None` if it never fired.
    pub fn elapsed(&self, now: Duration) -> Option<Duration> {
        self.last_fire.map(|last| now.saturating_sub(last))
    }

    /// Whether a check at `now` would fire, without consuming it.
    pub fn is_ready(&self, now: Duration) -> bool {
        self.is_ready_with(now, self.delay)
    }

    fn is_ready_with(&self, now: Duration, delay: Duration) -> bool {
        match self.elapsed(now) {
            Some(elapsed) => elapsed >= delay,
            None => true,
        }
    }

    /// Fire and reset if the window has elapsed.
    pub fn check(&mut self, now: Duration) -> bool {
        self.check_with(now, self.delay)
    }

    /// Same as [`Cooldown::check`] but with a one-off window length.
    pub fn check_with(&mut self, now: Duration, delay: Duration) -> bool {
        if self.is_ready_with(now, delay) {
            self.last_fire = Some(now);
            true
        } else {
            false
        }
    }

    /// Restart the current window at `now`.
    pub fn reset(&mut self, now: Duration) {
        self.last_fire = Some(now);
    }

    /// Change the window length for future checks; elapsed progress is kept.
    pub fn new_delay(&mut self, delay: Duration) {
        self.delay = delay;
    }

    /// Fraction of the current window that has elapsed, clamped to 1.
    pub fn progress(&self, now: Duration) -> f32 {
        if self.delay.is_zero() {
            return 1.0;
        }
        match self.elapsed(now) {
            Some(elapsed) => (elapsed.as_secs_f32() / self.delay.as_secs_f32()).min(1.0),
            None => 1.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ms(millis: u64) -> Duration {
        Duration::from_millis(millis)
    }

    #[test]
    fn fresh_cooldown_fires_immediately_then_waits() {
        let mut cooldown = Cooldown::from_millis(500);
        assert!(cooldown.check(ms(0)));
        assert!(!cooldown.check(ms(100)));
        assert!(!cooldown.check(ms(499)));
        assert!(cooldown.check(ms(500)));
        assert!(!cooldown.check(ms(501)));
    }

    #[test]
    fn started_cooldown_waits_a_full_window() {
        let mut cooldown = Cooldown::started(ms(1000), ms(250));
        assert!(!cooldown.check(ms(1100)));
        assert!(cooldown.check(ms(1250)));
    }

    #[test]
    fn failed_check_has_no_side_effect() {
        let mut cooldown = Cooldown::started(ms(0), ms(300));
        for t in [10, 50, 200, 299] {
            assert!(!cooldown.check(ms(t)));
        }
        assert_eq!(cooldown.elapsed(ms(299)), Some(ms(299)));
        assert!(cooldown.check(ms(300)));
    }

    #[test]
    fn new_delay_keeps_elapsed_progress() {
        let mut cooldown = Cooldown::started(ms(0), ms(1000));
        assert!(!cooldown.check(ms(400)));
        cooldown.new_delay(ms(300));
        assert!(cooldown.check(ms(400)));
    }

    #[test]
    fn override_window_of_zero_always_fires() {
        let mut cooldown = Cooldown::from_millis(500);
        assert!(cooldown.check(ms(0)));
        assert!(cooldown.check_with(ms(0), Duration::ZERO));
        assert!(cooldown.check_with(ms(1), Duration::ZERO));
    }

    #[test]
    fn progress_is_clamped() {
        let cooldown = Cooldown::started(ms(0), ms(200));
        assert_eq!(cooldown.progress(ms(100)), 0.5);
        assert_eq!(cooldown.progress(ms(900)), 1.0);
    }
}
