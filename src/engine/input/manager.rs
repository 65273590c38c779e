// Input manager - translates window events into actions

use super::action::{self, Action, InputSource};
use super::config::InputConfig;
use super::state::{ActionState, InputState};
use log::trace;
use std::collections::HashSet;
use winit::event::{ElementState, KeyEvent};
use winit::keyboard::PhysicalKey;

/// Coordinates key bindings and held-action state
#[derive(Debug)]
pub struct InputManager {
    /// Rebindable player bindings
    config: InputConfig,

    /// Bindings that always apply (quit)
    global_config: InputConfig,

    /// Keys currently down; several keys may map to one action
    held_keys: HashSet<InputSource>,

    state: InputState,
}

impl InputManager {
    pub fn new(config: InputConfig) -> Self {
        Self {
            config,
            global_config: InputConfig::from_bindings(action::global_bindings()),
            held_keys: HashSet::new(),
            state: InputState::new(),
        }
    }

    /// Process a keyboard event from winit.
    ///
    /// Returns the action whose key just went down, if any. Key repeats and
    /// releases never produce an action.
    pub fn process_keyboard_event(&mut self, event: &KeyEvent) -> Option<Action> {
        let PhysicalKey::Code(key_code) = event.physical_key else {
            return None;
        };
        let source = InputSource::key(key_code);

        match event.state {
            ElementState::Pressed if !event.repeat => self.key_down(source),
            ElementState::Pressed => None,
            ElementState::Released => {
                self.key_up(source);
                None
            }
        }
    }

    /// A key went down. Returns its action if that action was not already
    /// held through another key.
    pub fn key_down(&mut self, source: InputSource) -> Option<Action> {
        let action = self.get_action(source)?;
        if !self.held_keys.insert(source) {
            return None;
        }
        self.state.press(action).then_some(action)
    }

    /// A key went up. The action stays held while any other key bound to it is down.
    pub fn key_up(&mut self, source: InputSource) {
        let Some(action) = self.get_action(source) else {
            return;
        };
        self.held_keys.remove(&source);

        let still_held = self
            .config
            .get_sources(action)
            .into_iter()
            .chain(self.global_config.get_sources(action))
            .any(|other| self.held_keys.contains(&other));
        if still_held {
            trace!("{:?} still held after {:?} released", action, source);
        } else {
            self.state.release(action);
        }
    }

    /// Look up an action, player bindings first, then global bindings
    pub fn get_action(&self, source: InputSource) -> Option<Action> {
        self.config
            .get_action(source)
            .or_else(|| self.global_config.get_action(source))
    }

    /// Release all keys and actions
    pub fn reset(&mut self) {
        self.held_keys.clear();
        self.state.reset();
    }
}

impl Default for InputManager {
    fn default() -> Self {
        Self::new(InputConfig::with_defaults())
    }
}

impl ActionState for InputManager {
    fn is_pressed(&self, action: Action) -> bool {
        self.state.is_pressed(action)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use winit::keyboard::KeyCode;

    fn key(code: KeyCode) -> InputSource {
        InputSource::key(code)
    }

    #[test]
    fn test_press_edge() {
        let mut manager = InputManager::default();
        assert_eq!(manager.key_down(key(KeyCode::Space)), Some(Action::Attack));
        assert_eq!(manager.key_down(key(KeyCode::Space)), None);
        assert!(manager.is_pressed(Action::Attack));

        manager.key_up(key(KeyCode::Space));
        assert!(!manager.is_pressed(Action::Attack));
        assert_eq!(manager.key_down(key(KeyCode::Space)), Some(Action::Attack));
    }

    #[test]
    fn test_releasing_one_of_two_bound_keys_keeps_action_held() {
        let mut manager = InputManager::default();
        assert_eq!(manager.key_down(key(KeyCode::ArrowRight)), Some(Action::MoveRight));
        // Second key for the same action is not a new press
        assert_eq!(manager.key_down(key(KeyCode::KeyD)), None);

        manager.key_up(key(KeyCode::KeyD));
        assert!(manager.is_pressed(Action::MoveRight));

        manager.key_up(key(KeyCode::ArrowRight));
        assert!(!manager.is_pressed(Action::MoveRight));
    }

    #[test]
    fn test_release_order_does_not_matter() {
        let mut manager = InputManager::default();
        manager.key_down(key(KeyCode::ArrowUp));
        manager.key_down(key(KeyCode::KeyW));

        manager.key_up(key(KeyCode::ArrowUp));
        assert!(manager.is_pressed(Action::Jump));

        manager.key_up(key(KeyCode::KeyW));
        assert!(!manager.is_pressed(Action::Jump));
    }

    #[test]
    fn test_unbound_keys_are_ignored() {
        let mut manager = InputManager::default();
        assert_eq!(manager.key_down(key(KeyCode::F12)), None);
        manager.key_up(key(KeyCode::F12));
        assert!(!manager.is_pressed(Action::MoveLeft));
    }

    #[test]
    fn test_global_bindings_apply() {
        let manager = InputManager::default();
        assert_eq!(
            manager.get_action(InputSource::key(KeyCode::Escape)),
            Some(Action::Quit)
        );
    }

    #[test]
    fn test_player_bindings_take_priority() {
        let mut config = InputConfig::with_defaults();
        config.bind(InputSource::key(KeyCode::Escape), Action::Attack);
        let manager = InputManager::new(config);

        assert_eq!(
            manager.get_action(InputSource::key(KeyCode::Escape)),
            Some(Action::Attack)
        );
    }

    #[test]
    fn test_unbound_key() {
        let manager = InputManager::default();
        assert_eq!(manager.get_action(InputSource::key(KeyCode::F12)), None);
    }

    #[test]
    fn test_reset() {
        let mut manager = InputManager::default();
        manager.key_down(key(KeyCode::ArrowRight));
        manager.key_down(key(KeyCode::KeyD));
        manager.reset();
        assert!(!manager.is_pressed(Action::MoveRight));

        // Keys held before the reset count as fresh presses
        assert_eq!(manager.key_down(key(KeyCode::KeyD)), Some(Action::MoveRight));
    }
}
