// Held-action state

use super::action::Action;
use std::collections::HashSet;

/// Level-triggered view of the input: "is this action held right now?"
pub trait ActionState {
    fn is_pressed(&self, action: Action) -> bool;

    /// Either horizontal direction is held
    fn horizontal_held(&self) -> bool {
        self.is_pressed(Action::MoveLeft) || self.is_pressed(Action::MoveRight)
    }
}

/// Tracks which actions are currently held
#[derive(Debug, Default, Clone)]
pub struct InputState {
    pressed: HashSet<Action>,
}

impl InputState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an action press.
    /// Returns true on the unpressed -> pressed edge only.
    pub fn press(&mut self, action: Action) -> bool {
        self.pressed.insert(action)
    }

    /// Register an action release
    pub fn release(&mut self, action: Action) {
        self.pressed.remove(&action);
    }

    /// Release everything (e.g. when the window loses focus)
    pub fn reset(&mut self) {
        self.pressed.clear();
    }
}

impl ActionState for InputState {
    fn is_pressed(&self, action: Action) -> bool {
        self.pressed.contains(&action)
    }
}
