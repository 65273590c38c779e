// Character entity

use glam::Vec2;
use log::debug;

use super::state::{transition, CharacterState, Facing, MotionEvent};
use crate::game::arena::Arena;

/// The controllable character.
///
/// `position.y` is the vertical center the sprite is drawn around, not its
/// top edge.
#[derive(Debug, Clone, PartialEq)]
pub struct Character {
    pub position: Vec2,
    pub facing: Facing,
    /// Pixels per tick, positive = downward
    pub vertical_velocity: f32,
    pub on_ground: bool,
    state: CharacterState,
    /// Tick the current attack began (meaningful only while attacking)
    attack_start_tick: u64,
}

impl Character {
    /// Create a standing character on the ground at the center of the arena
    pub fn spawn(arena: &Arena) -> Self {
        Self {
            position: Vec2::new(arena.center_x(), arena.ground_y),
            facing: Facing::Right,
            vertical_velocity: 0.0,
            on_ground: true,
            state: CharacterState::Stand,
            attack_start_tick: 0,
        }
    }

    /// Get the current state
    pub fn state(&self) -> CharacterState {
        self.state
    }

    /// Get the tick the current attack started on
    pub fn attack_start_tick(&self) -> u64 {
        self.attack_start_tick
    }

    /// Feed an event through the state machine, returning the new state
    pub fn apply(&mut self, event: MotionEvent) -> CharacterState {
        let next = transition(self.state, event);
        if next != self.state {
            debug!("{:?} -> {:?} on {:?}", self.state, next, event);
            self.state = next;
        }
        next
    }

    /// Start (or restart) an attack at `tick`. Ignored while airborne.
    pub fn try_attack(&mut self, tick: u64) -> bool {
        let event = MotionEvent::AttackPressed {
            grounded: self.on_ground,
        };
        if self.apply(event) != CharacterState::Attack || !self.on_ground {
            return false;
        }
        self.attack_start_tick = tick;
        debug!("Attack started at tick {}", tick);
        true
    }

    /// Integrate gravity for one tick and resolve ground contact
    pub fn apply_gravity(&mut self, gravity: f32, ground_y: f32) {
        self.vertical_velocity += gravity;
        self.position.y += self.vertical_velocity;

        if self.position.y >= ground_y {
            self.position.y = ground_y;
            self.vertical_velocity = 0.0;
            self.on_ground = true;
        } else {
            self.on_ground = false;
        }
    }

    /// Launch upward with the given (negative) velocity
    pub fn launch(&mut self, jump_strength: f32) {
        self.vertical_velocity = jump_strength;
        self.on_ground = false;
        self.apply(MotionEvent::Jumped);
    }

    /// Follow the ground after the screen was resized, and recenter horizontally
    pub fn on_arena_resized(&mut self, arena: &Arena, ground_delta: f32) {
        self.position.y += ground_delta;
        self.position.x = arena.center_x();
    }
}
