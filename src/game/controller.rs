// Per-tick motion and state update

use crate::core::math::clamp;
use crate::engine::game_loop::TickSource;
use crate::engine::input::{Action, ActionState};

use super::arena::Arena;
use super::characters::{Character, CharacterState, CharacterStats, Facing, MotionEvent};

/// Drives the character from held input, gravity and the tick count
#[derive(Debug, Clone)]
pub struct MotionController {
    stats: CharacterStats,
    /// Ticks an attack lasts before the character may move again
    attack_duration: u64,
}

impl MotionController {
    pub fn new(stats: CharacterStats, attack_frame_count: usize) -> Self {
        Self {
            attack_duration: stats.one_shot_duration(attack_frame_count),
            stats,
        }
    }

    pub fn stats(&self) -> &CharacterStats {
        &self.stats
    }

    pub fn attack_duration(&self) -> u64 {
        self.attack_duration
    }

    /// Run one tick. Order matters: attack expiry, then physics, then input,
    /// then the horizontal clamp.
    pub fn update(
        &self,
        character: &mut Character,
        input: &impl ActionState,
        clock: &impl TickSource,
        arena: &Arena,
    ) {
        let tick = clock.current_tick();

        if character.state() == CharacterState::Attack
            && tick >= character.attack_start_tick() + self.attack_duration
        {
            character.apply(MotionEvent::AttackFinished {
                horizontal_held: input.horizontal_held(),
            });
        }

        character.apply_gravity(self.stats.gravity, arena.ground_y);

        if character.state().accepts_movement() {
            self.apply_input(character, input);
        }

        character.position.x = clamp(character.position.x, 0.0, arena.width);
    }

    fn apply_input(&self, character: &mut Character, input: &impl ActionState) {
        if input.is_pressed(Action::Jump) && character.on_ground {
            character.launch(self.stats.jump_strength);
        } else if input.is_pressed(Action::MoveRight) {
            character.position.x += self.stats.speed;
            character.facing = Facing::Right;
            character.apply(MotionEvent::Moved {
                grounded: character.on_ground,
            });
        } else if input.is_pressed(Action::MoveLeft) {
            character.position.x -= self.stats.speed;
            character.facing = Facing::Left;
            character.apply(MotionEvent::Moved {
                grounded: character.on_ground,
            });
        } else {
            character.apply(MotionEvent::NoInput {
                grounded: character.on_ground,
            });
        }

        // Walked off a ledge without jumping
        if !character.on_ground {
            character.apply(MotionEvent::Airborne);
        }
    }

    /// Edge-triggered attack: starts an attack if the character is on the ground
    pub fn trigger_attack(&self, character: &mut Character, clock: &impl TickSource) -> bool {
        character.try_attack(clock.current_tick())
    }
}
