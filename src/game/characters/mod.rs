// Character system
//
// This module contains everything related to the animated character:
// - Character data and physics state
// - Tuning constants
// - State machine driving which animation plays
// - Sprite sheet animation sets

pub mod animation;
pub mod character;
pub mod state;
pub mod stats;

// Re-export commonly used types
pub use animation::{AnimationLibrary, AnimationSet};
pub use character::Character;
pub use state::{CharacterState, Facing, MotionEvent};
pub use stats::{CharacterStats, BASE_STATS};
