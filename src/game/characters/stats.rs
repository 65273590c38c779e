// Character motion tuning
//
// Units are pixels and ticks: one tick is one fixed simulation step.

/// Movement and animation tuning for the character
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CharacterStats {
    // Movement
    /// Horizontal displacement per tick while a direction is held
    pub speed: f32,
    /// Vertical velocity set on jump (negative = upward)
    pub jump_strength: f32,

    // Physics
    /// Added to vertical velocity every tick
    pub gravity: f32,
    /// Ground height as a fraction of the screen height
    pub ground_ratio: f32,

    // Animation
    /// Ticks each animation frame stays on screen
    pub animation_speed: u64,
}

/// The tuning the character ships with
pub const BASE_STATS: CharacterStats = CharacterStats {
    speed: 3.0,
    jump_strength: -12.0,

    gravity: 0.5,
    ground_ratio: 0.75,

    animation_speed: 8,
};

impl Default for CharacterStats {
    fn default() -> Self {
        BASE_STATS
    }
}

impl CharacterStats {
    /// Number of ticks a one-shot animation with `frame_count` frames lasts
    pub fn one_shot_duration(&self, frame_count: usize) -> u64 {
        frame_count as u64 * self.animation_speed
    }

    /// Ground height for a screen of the given height
    pub fn ground_y(&self, screen_height: f32) -> f32 {
        screen_height * self.ground_ratio
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_stats() {
        let stats = CharacterStats::default();
        assert_eq!(stats.speed, 3.0);
        assert_eq!(stats.jump_strength, -12.0);
        assert_eq!(stats.gravity, 0.5);
        assert_eq!(stats.animation_speed, 8);
    }

    #[test]
    fn test_one_shot_duration() {
        assert_eq!(BASE_STATS.one_shot_duration(3), 24);
        assert_eq!(BASE_STATS.one_shot_duration(0), 0);
    }

    #[test]
    fn test_ground_y() {
        assert_eq!(BASE_STATS.ground_y(400.0), 300.0);
        assert_eq!(BASE_STATS.ground_y(720.0), 540.0);
    }
}
