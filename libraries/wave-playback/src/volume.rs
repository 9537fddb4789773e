//! Volume and mute

/// Volume controller
///
/// Stores the listener's preferred level separately from the mute flag so
/// that unmuting restores the last level.
#[derive(Debug, Clone)]
pub struct Volume {
    /// Preferred level (0.0-1.0)
    level: f32,

    /// Mute state (preserves level)
    muted: bool,
}

impl Volume {
    /// Create new volume controller, clamping `level` to [0, 1]
    pub fn new(level: f32) -> Self {
        Self {
            level: clamp_level(level),
            muted: false,
        }
    }

    /// Set the preferred level; stays silent while muted
    pub fn set_level(&mut self, level: f32) {
        self.level = clamp_level(level);
    }

    /// Preferred level (0.0-1.0)
    pub fn level(&self) -> f32 {
        self.level
    }

    pub fn toggle_mute(&mut self) {
        self.muted = !self.muted;
    }

    pub fn is_muted(&self) -> bool {
        self.muted
    }

    /// Level to hand to the media sink
    pub fn audible(&self) -> f32 {
        if self.muted {
            0.0
        } else {
            self.level
        }
    }
}

impl Default for Volume {
    fn default() -> Self {
        Self::new(0.8)
    }
}

fn clamp_level(level: f32) -> f32 {
    if level.is_nan() {
        0.0
    } else {
        level.clamp(0.0, 1.0)
    }
}
