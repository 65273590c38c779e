// Game layer: the character, its controller and how it is drawn

pub mod arena;
pub mod characters;
pub mod controller;
pub mod frame_renderer;

use log::info;

use crate::engine::game_loop::{TickCounter, TickSource};
use crate::engine::input::{Action, ActionState};
use crate::engine::renderer::{RenderSurface, WHITE};

use arena::Arena;
use characters::{AnimationLibrary, Character, CharacterState, CharacterStats};
use controller::MotionController;
use frame_renderer::{FrameRenderer, FrameSelection};

/// Everything one running animator owns
pub struct Game {
    character: Character,
    controller: MotionController,
    frame_renderer: FrameRenderer,
    library: AnimationLibrary,
    arena: Arena,
    clock: TickCounter,
}

impl Game {
    /// Create a game for a `width` x `height` screen with the character standing at its center
    pub fn new(library: AnimationLibrary, stats: CharacterStats, width: f32, height: f32) -> Self {
        let arena = Arena::new(width, height, &stats);
        let attack_frames = library.get(CharacterState::Attack).frame_count;
        let controller = MotionController::new(stats, attack_frames);
        info!(
            "Arena {}x{}, ground at {}, attack lasts {} ticks",
            width,
            height,
            arena.ground_y,
            controller.attack_duration()
        );

        Self {
            character: Character::spawn(&arena),
            frame_renderer: FrameRenderer::new(stats.animation_speed),
            controller,
            library,
            arena,
            clock: TickCounter::new(),
        }
    }

    /// Advance the simulation by one tick using the currently held input
    pub fn tick(&mut self, input: &impl ActionState) {
        self.clock.advance();
        self.controller
            .update(&mut self.character, input, &self.clock, &self.arena);
    }

    /// Handle a freshly pressed action. Returns false if it had no effect,
    /// such as an attack pressed in the air.
    pub fn handle_action(&mut self, action: Action) -> bool {
        match action {
            Action::Attack => self
                .controller
                .trigger_attack(&mut self.character, &self.clock),
            _ => false,
        }
    }

    /// Clear the surface and draw the character's current frame
    pub fn draw(&self, surface: &mut impl RenderSurface) -> FrameSelection {
        surface.clear(WHITE);
        self.frame_renderer
            .draw(surface, &self.character, &self.library, &self.clock)
    }

    /// Follow a window resize
    pub fn resize(&mut self, width: f32, height: f32) {
        let delta = self.arena.resize(width, height, self.controller.stats());
        self.character.on_arena_resized(&self.arena, delta);
        info!("Arena resized to {}x{}, ground at {}", width, height, self.arena.ground_y);
    }

    pub fn current_tick(&self) -> u64 {
        self.clock.current_tick()
    }
}
