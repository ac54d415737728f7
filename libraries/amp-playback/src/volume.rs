//! Volume control
//!
//! Level and mute are independent: muting never alters the stored
//! level, so unmute restores it exactly.

/// Volume state
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Volume {
    /// Volume level (0.0-1.0)
    level: f32,

    /// Mute state (preserves the level)
    muted: bool,
}

impl Volume {
    /// Create a volume controller, clamping the level to [0, 1]
    pub fn new(level: f32) -> Self {
        Self {
            level: level.clamp(0.0, 1.0),
            muted: false,
        }
    }

    /// Set the level (clamped), leaving mute untouched
    pub fn set_level(&mut self, level: f32) {
        self.level = level.clamp(0.0, 1.0);
    }

    /// Current level (0.0-1.0)
    pub fn level(&self) -> f32 {
        self.level
    }

    /// Mute (level preserved)
    pub fn mute(&mut self) {
        self.muted = true;
    }

    /// Unmute (level restored exactly)
    pub fn unmute(&mut self) {
        self.muted = false;
    }

    /// Toggle mute
    pub fn toggle_mute(&mut self) {
        self.muted = !self.muted;
    }

    /// Check mute state
    pub fn is_muted(&self) -> bool {
        self.muted
    }

    /// Effective output level: 0.0 when muted, else the stored level
    pub fn effective(&self) -> f32 {
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
