/// Monotonic frame clock.
/// Accumulates real elapsed time from per-frame deltas. Never runs backwards:
/// negative or non-finite deltas count as zero.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Clock {
    /// Total elapsed seconds. f64 so long sessions keep sub-millisecond resolution.
    elapsed: f64,
}

impl Clock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sanitize a raw frame delta: negative, NaN and infinite values become 0.
    #[inline]
    pub fn sanitize(dt: f32) -> f32 {
        if dt.is_finite() && dt > 0.0 { dt } else { 0.0 }
    }

    /// Advance by one frame delta. Returns the sanitized delta actually applied.
    pub fn advance(&mut self, dt: f32) -> f32 {
        let dt = Self::sanitize(dt);
        self.elapsed += dt as f64;
        dt
    }

    /// Total elapsed seconds since the clock was created.
    pub fn now(&self) -> f64 {
        self.elapsed
    }
}

/// Expiring token: an activation timestamp plus a lifetime, both in clock seconds.
///
/// Replaces one-shot deferred callbacks. Whoever owns the token compares it
/// against the clock each frame; overwriting the token is the cancellation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Expiry {
    started_at: f64,
    duration: f64,
}

impl Expiry {
    pub fn new(started_at: f64, duration: f64) -> Self {
        Self {
            started_at,
            duration: duration.max(0.0),
        }
    }

    /// Whether the lifetime has fully elapsed at time `now`.
    pub fn is_expired(&self, now: f64) -> bool {
        now - self.started_at >= self.duration
    }

    /// Seconds left before expiry (0 once expired).
    pub fn remaining(&self, now: f64) -> f64 {
        (self.duration - (now - self.started_at)).max(0.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clock_accumulates() {
        let mut clock = Clock::new();
        clock.advance(0.5);
        assert_eq!(clock.advance(0.25), 0.25);
        assert!((clock.now() - 0.75).abs() < 1e-9);
    }

    #[test]
    fn clock_ignores_bad_deltas() {
        let mut clock = Clock::new();
        clock.advance(1.0);
        assert_eq!(clock.advance(-3.0), 0.0);
        assert_eq!(clock.advance(f32::NAN), 0.0);
        assert_eq!(clock.advance(f32::INFINITY), 0.0);
        assert!((clock.now() - 1.0).abs() < 1e-9);
    }

    #[test]
    fn expiry_fires_at_duration() {
        let token = Expiry::new(10.0, 5.0);
        assert!(!token.is_expired(10.0));
        assert!(!token.is_expired(14.99));
        assert!(token.is_expired(15.0));
        assert!(token.is_expired(100.0));
    }

    #[test]
    fn expiry_remaining_counts_down() {
        let token = Expiry::new(2.0, 3.0);
        assert!((token.remaining(3.0) - 2.0).abs() < 1e-9);
        assert_eq!(token.remaining(9.0), 0.0);
    }

    #[test]
    fn negative_duration_expires_immediately() {
        let token = Expiry::new(1.0, -4.0);
        assert!(token.is_expired(1.0));
        assert_eq!(token.remaining(1.0), 0.0);
    }
}
