/// Hover and focus state.
///
/// Focus is an expiring token: the vantage point plus the clock time it was
/// armed. Whoever owns the trigger calls `expire` once per frame.

use glam::Vec3;
use orrery_engine::{Expiry, Rng};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FocusPhase {
    Idle,
    Traveling,
}

/// Point the camera travels toward after a click.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FocusTarget {
    /// Registry index of the clicked body.
    pub body: usize,
    pub point: Vec3,
    expiry: Expiry,
}

impl FocusTarget {
    pub fn expiry(&self) -> Expiry {
        self.expiry
    }

    pub fn remaining(&self, now: f64) -> f64 {
        self.expiry.remaining(now)
    }
}

/// Random point on the circle of `distance` around the origin, raised by `height`.
/// The body's live position is deliberately not consulted.
pub fn vantage_point(angle: f64, distance: f64, height: f32) -> Vec3 {
    Vec3::new(
        (angle.cos() * distance) as f32,
        height,
        (angle.sin() * distance) as f32,
    )
}

/// Idle/Traveling state machine for the click-to-focus interaction.
#[derive(Debug, Clone, PartialEq)]
pub struct FocusTrigger {
    target: Option<FocusTarget>,
    duration: f64,
    height: f32,
}

impl FocusTrigger {
    pub fn new(duration: f64, height: f32) -> Self {
        Self {
            target: None,
            duration,
            height,
        }
    }

    /// Arm (or re-arm) focus on `body`. Replaces any active target and
    /// restarts the expiry window at `now`.
    pub fn arm(&mut self, body: usize, distance: f64, now: f64, rng: &mut Rng) -> FocusTarget {
        let target = FocusTarget {
            body,
            point: vantage_point(rng.next_angle(), distance, self.height),
            expiry: Expiry::new(now, self.duration),
        };
        self.target = Some(target);
        target
    }

    /// Drop the target once its window has elapsed. Returns true if it was cleared.
    pub fn expire(&mut self, now: f64) -> bool {
        match self.target {
            Some(t) if t.expiry.is_expired(now) => {
                self.target = None;
                true
            }
            _ => false,
        }
    }

    pub fn active(&self) -> Option<&FocusTarget> {
        self.target.as_ref()
    }

    pub fn phase(&self) -> FocusPhase {
        if self.target.is_some() {
            FocusPhase::Traveling
        } else {
            FocusPhase::Idle
        }
    }
}

/// Which body the pointer is over. Display only.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct HoverState {
    hovered: Option<usize>,
}

impl HoverState {
    pub fn enter(&mut self, body: usize) {
        self.hovered = Some(body);
    }

    pub fn leave(&mut self) {
        self.hovered = None;
    }

    pub fn hovered(&self) -> Option<usize> {
        self.hovered
    }

    pub fn is_hovered(&self, body: usize) -> bool {
        self.hovered == Some(body)
    }
}
