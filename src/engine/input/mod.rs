// Input handling system
//
// Keyboard input is split into two views:
//
// - level-triggered: `ActionState::is_pressed` answers "is this action held?"
//   and is what the per-tick controller reads
// - edge-triggered: `InputManager::process_keyboard_event` returns the action
//   whose key just went down, once per press (key repeats are ignored)
//
// Several keys can bind the same action; the action stays held until the
// last of them is released.
//
// ## Usage Example
//
// ```rust
// let mut input = InputManager::default();
//
// // In the event loop
// if let Some(Action::Attack) = input.process_keyboard_event(&key_event) {
//     // fire the attack trigger
// }
//
// // Each tick
// let moving = input.is_pressed(Action::MoveRight);
// ```

pub mod action;
pub mod config;
pub mod manager;
pub mod state;

// Re-export commonly used types
pub use action::Action;
pub use manager::InputManager;
pub use state::ActionState;
