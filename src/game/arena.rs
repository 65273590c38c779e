// Screen bounds the character moves within

use super::characters::CharacterStats;

/// Playable area: the whole window, with the ground at a fixed fraction of its height
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Arena {
    pub width: f32,
    pub height: f32,
    pub ground_y: f32,
}

impl Arena {
    pub fn new(width: f32, height: f32, stats: &CharacterStats) -> Self {
        Self {
            width,
            height,
            ground_y: stats.ground_y(height),
        }
    }

    /// Horizontal center of the screen
    pub fn center_x(&self) -> f32 {
        self.width / 2.0
    }

    /// Adopt a new screen size, returning how far the ground moved
    pub fn resize(&mut self, width: f32, height: f32, stats: &CharacterStats) -> f32 {
        let old_ground = self.ground_y;
        *self = Self::new(width, height, stats);
        self.ground_y - old_ground
    }
}
