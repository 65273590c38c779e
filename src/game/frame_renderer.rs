// Sprite frame selection and drawing

use glam::Vec2;

use crate::core::math::Rect;
use crate::engine::game_loop::TickSource;
use crate::engine::renderer::RenderSurface;

use super::characters::{AnimationLibrary, AnimationSet, Character, CharacterState};

/// The frame chosen for one render
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameSelection {
    pub state: CharacterState,
    pub set: AnimationSet,
    pub frame_index: usize,
    pub source: Rect,
}

/// Picks the character's current sprite frame and draws it
#[derive(Debug, Clone)]
pub struct FrameRenderer {
    animation_speed: u64,
}

impl FrameRenderer {
    pub fn new(animation_speed: u64) -> Self {
        Self { animation_speed }
    }

    /// Choose the sheet and frame for the character at `tick`
    pub fn select(
        &self,
        character: &Character,
        library: &AnimationLibrary,
        tick: u64,
    ) -> FrameSelection {
        let state = character.state();
        let set = *library.get(state);
        let frame_index = if state.is_looping() {
            set.looping_frame(tick, self.animation_speed)
        } else {
            set.one_shot_frame(tick, character.attack_start_tick(), self.animation_speed)
        };

        FrameSelection {
            state,
            set,
            frame_index,
            source: set.source_rect(frame_index),
        }
    }

    /// Draw the current frame centered on the character, mirrored when facing left
    pub fn draw(
        &self,
        surface: &mut impl RenderSurface,
        character: &Character,
        library: &AnimationLibrary,
        clock: &impl TickSource,
    ) -> FrameSelection {
        let selection = self.select(character, library, clock.current_tick());

        surface.push_transform();
        surface.translate(character.position);
        surface.scale(Vec2::new(character.facing.scale_x(), 1.0));
        surface.draw_image(selection.set.texture, selection.set.dest_rect(), selection.source);
        surface.pop_transform();

        selection
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::renderer::{SpriteBatch, TextureHandle};
    use crate::game::arena::Arena;
    use crate::game::characters::{Facing, BASE_STATS};

    /// Records calls instead of drawing
    #[derive(Default)]
    struct RecordingSurface {
        calls: Vec<String>,
    }

    impl RenderSurface for RecordingSurface {
        fn clear(&mut self, color: [f32; 4]) {
            self.calls.push(format!("clear {:?}", color));
        }

        fn push_transform(&mut self) {
            self.calls.push("push".to_string());
        }

        fn pop_transform(&mut self) {
            self.calls.push("pop".to_string());
        }

        fn translate(&mut self, offset: Vec2) {
            self.calls.push(format!("translate {} {}", offset.x, offset.y));
        }

        fn scale(&mut self, factor: Vec2) {
            self.calls.push(format!("scale {} {}", factor.x, factor.y));
        }

        fn draw_image(&mut self, texture: TextureHandle, dest: Rect, source: Rect) {
            self.calls.push(format!(
                "draw {} dest({} {} {} {}) src({} {} {} {})",
                texture.0,
                dest.x,
                dest.y,
                dest.width,
                dest.height,
                source.x,
                source.y,
                source.width,
                source.height
            ));
        }
    }

    /// Sheets with 32x48 frames: stand 2, walk 6, jump 3, attack 3
    fn library() -> AnimationLibrary {
        let sheet = |texture, frames: usize| {
            AnimationSet::from_sheet("test", TextureHandle(texture), 32 * frames as u32, 48, frames)
                .unwrap()
        };
        AnimationLibrary::new(sheet(0, 2), sheet(1, 6), sheet(2, 3), sheet(3, 3))
    }

    fn character() -> Character {
        Character::spawn(&Arena::new(800.0, 400.0, &BASE_STATS))
    }

    #[test]
    fn test_stand_loops_over_two_frames() {
        let renderer = FrameRenderer::new(8);
        let library = library();
        let character = character();

        let frames: Vec<usize> = [0, 8, 16, 24]
            .iter()
            .map(|&t| renderer.select(&character, &library, t).frame_index)
            .collect();
        assert_eq!(frames, vec![0, 1, 0, 1]);
    }

    #[test]
    fn test_walk_scenario_frame() {
        let renderer = FrameRenderer::new(8);
        let library = library();
        let mut character = character();
        character.apply(crate::game::characters::MotionEvent::Moved { grounded: true });

        let selection = renderer.select(&character, &library, 9);
        assert_eq!(selection.state, CharacterState::Walk);
        assert_eq!(selection.frame_index, 1);
        assert_eq!(selection.source, Rect::new(32.0, 0.0, 32.0, 48.0));
        assert_eq!(selection.set.texture, TextureHandle(1));
    }

    #[test]
    fn test_attack_frame_counts_from_start_and_clamps() {
        let renderer = FrameRenderer::new(8);
        let library = library();
        let mut character = character();
        character.try_attack(101);

        assert_eq!(renderer.select(&character, &library, 101).frame_index, 0);
        assert_eq!(renderer.select(&character, &library, 109).frame_index, 1);
        assert_eq!(renderer.select(&character, &library, 117).frame_index, 2);
        assert_eq!(renderer.select(&character, &library, 1_000).frame_index, 2);
    }

    #[test]
    fn test_draw_facing_right() {
        let renderer = FrameRenderer::new(8);
        let mut surface = RecordingSurface::default();

        renderer.draw(&mut surface, &character(), &library(), &0u64);

        assert_eq!(
            surface.calls,
            vec![
                "push",
                "translate 400 300",
                "scale 1 1",
                "draw 0 dest(-16 -24 32 48) src(0 0 32 48)",
                "pop",
            ]
        );
    }

    #[test]
    fn test_draw_facing_left_mirrors() {
        let renderer = FrameRenderer::new(8);
        let mut surface = RecordingSurface::default();
        let mut character = character();
        character.facing = Facing::Left;

        renderer.draw(&mut surface, &character, &library(), &8u64);

        assert_eq!(surface.calls[2], "scale -1 1");
        assert_eq!(surface.calls[3], "draw 0 dest(-16 -24 32 48) src(32 0 32 48)");
    }

    #[test]
    fn test_draw_into_sprite_batch() {
        let renderer = FrameRenderer::new(8);
        let mut batch = SpriteBatch::new();
        let mut character = character();
        character.facing = Facing::Left;

        renderer.draw(&mut batch, &character, &library(), &0u64);

        let quad = &batch.quads()[0];
        // Mirrored: the sheet's left edge is drawn on the right
        assert_eq!(quad.corners[0], Vec2::new(416.0, 276.0));
        assert_eq!(quad.corners[2], Vec2::new(384.0, 324.0));
    }
}
