//! Normalized per-frame movement intent.
//!
//! The simulation never sees keys, touches or sticks; hosts fold whatever
//! they have into one `InputSnapshot` per frame.

/// Below this distance the player stops chasing a target point, so it
/// doesn't jitter around it.
pub const TARGET_DEADZONE: f32 = 5.0;

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct InputSnapshot {
    /// Direction vector, each axis in `-1.0..=1.0`. `+y` points down.
    pub direction: (f32, f32),
    /// Absolute playfield point to steer towards. Takes precedence over
    /// `direction` when present.
    pub target: Option<(f32, f32)>,
}

impl InputSnapshot {
    pub fn idle() -> Self {
        Self::default()
    }

    pub fn vector(dx: f32, dy: f32) -> Self {
        InputSnapshot {
            direction: (unit_clamp(dx), unit_clamp(dy)),
            target: None,
        }
    }

    /// Discrete directions as held on a keyboard. Opposite keys cancel.
    pub fn from_keys(up: bool, down: bool, left: bool, right: bool) -> Self {
        let axis = |neg: bool, pos: bool| (pos as i8 - neg as i8) as f32;
        Self::vector(axis(left, right), axis(up, down))
    }

    /// Virtual-stick offset from its base. The stick saturates at
    /// `max_distance`; shorter pulls give proportionally slower movement.
    pub fn from_stick(dx: f32, dy: f32, max_distance: f32) -> Self {
        let distance = (dx * dx + dy * dy).sqrt();
        if !(distance > 0.0) || !(max_distance > 0.0) {
            return Self::idle();
        }
        let scale = distance.min(max_distance) / max_distance / distance;
        Self::vector(dx * scale, dy * scale)
    }

    /// Pointer or touch position to follow.
    pub fn toward(x: f32, y: f32) -> Self {
        if !x.is_finite() || !y.is_finite() {
            return Self::idle();
        }
        InputSnapshot {
            direction: (0.0, 0.0),
            target: Some((x, y)),
        }
    }

    pub fn is_moving(&self) -> bool {
        self.target.is_some() || self.direction != (0.0, 0.0)
    }
}

fn unit_clamp(v: f32) -> f32 {
    if v.is_finite() {
        v.clamp(-1.0, 1.0)
    } else {
        0.0
    }
}
