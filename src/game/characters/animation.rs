// Character animation system
//
// Each state has its own horizontal sprite sheet. Frame selection is a pure
// function of the tick: looping states run off the global tick, the attack
// runs off the tick it started at and holds its last frame.

use super::state::CharacterState;
use crate::core::math::Rect;
use crate::engine::assets::{AssetError, AssetLoader};
use crate::engine::renderer::TextureHandle;
use anyhow::Result;
use image::GenericImageView;
use log::info;

/// Where a state's sprite sheet lives and how many frames it holds
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SheetSpec {
    pub state: CharacterState,
    /// Path relative to the asset root
    pub path: &'static str,
    pub frame_count: usize,
}

/// The four sheets the character ships with
pub const STANDARD_SHEETS: [SheetSpec; 4] = [
    SheetSpec {
        state: CharacterState::Stand,
        path: "stand/1all.png",
        frame_count: 2,
    },
    SheetSpec {
        state: CharacterState::Walk,
        path: "walk/2all.png",
        frame_count: 6,
    },
    SheetSpec {
        state: CharacterState::Jump,
        path: "jump/3all.png",
        frame_count: 3,
    },
    SheetSpec {
        state: CharacterState::Attack,
        path: "attack/4all.png",
        frame_count: 3,
    },
];

/// A validated sprite sheet: frames laid out left to right, equal width
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AnimationSet {
    pub texture: TextureHandle,
    pub frame_count: usize,
    pub frame_width: f32,
    pub frame_height: f32,
}

impl AnimationSet {
    /// Build a set from a sheet's pixel size, rejecting sheets that cannot hold `frame_count` frames
    pub fn from_sheet(
        name: &str,
        texture: TextureHandle,
        sheet_width: u32,
        sheet_height: u32,
        frame_count: usize,
    ) -> Result<Self, AssetError> {
        let invalid = |reason: String| AssetError::InvalidSheet {
            name: name.to_string(),
            reason,
        };

        if frame_count == 0 {
            return Err(invalid("frame count is zero".to_string()));
        }
        if sheet_width == 0 || sheet_height == 0 {
            return Err(invalid(format!(
                "image is {}x{}",
                sheet_width, sheet_height
            )));
        }
        if (sheet_width as usize) < frame_count {
            return Err(invalid(format!(
                "{} px wide sheet cannot hold {} frames",
                sheet_width, frame_count
            )));
        }

        Ok(Self {
            texture,
            frame_count,
            frame_width: sheet_width as f32 / frame_count as f32,
            frame_height: sheet_height as f32,
        })
    }

    /// Frame of a looping animation at `tick`
    pub fn looping_frame(&self, tick: u64, animation_speed: u64) -> usize {
        ((tick / animation_speed) % self.frame_count as u64) as usize
    }

    /// Frame of a one-shot animation started at `start_tick`, held on the last frame
    pub fn one_shot_frame(&self, tick: u64, start_tick: u64, animation_speed: u64) -> usize {
        let elapsed = tick.saturating_sub(start_tick) / animation_speed;
        (elapsed as usize).min(self.frame_count - 1)
    }

    /// Source rectangle of a frame within the sheet
    pub fn source_rect(&self, frame_index: usize) -> Rect {
        Rect::new(
            frame_index as f32 * self.frame_width,
            0.0,
            self.frame_width,
            self.frame_height,
        )
    }

    /// Destination rectangle centered on the draw origin
    pub fn dest_rect(&self) -> Rect {
        Rect::centered(self.frame_width, self.frame_height)
    }
}

/// One animation set per character state
#[derive(Debug, Clone)]
pub struct AnimationLibrary {
    stand: AnimationSet,
    walk: AnimationSet,
    jump: AnimationSet,
    attack: AnimationSet,
}

impl AnimationLibrary {
    pub fn new(
        stand: AnimationSet,
        walk: AnimationSet,
        jump: AnimationSet,
        attack: AnimationSet,
    ) -> Self {
        Self {
            stand,
            walk,
            jump,
            attack,
        }
    }

    /// Load every standard sheet, handing each decoded image to `upload`
    /// and validating its dimensions.
    pub fn load<F>(loader: &AssetLoader, mut upload: F) -> Result<Self>
    where
        F: FnMut(&str, &image::DynamicImage) -> Result<TextureHandle>,
    {
        let mut load_set = |spec: &SheetSpec| -> Result<AnimationSet> {
            let image = loader.load_image(spec.path)?;
            let texture = upload(spec.path, &image)?;
            let (width, height) = image.dimensions();
            let set = AnimationSet::from_sheet(
                spec.state.animation_name(),
                texture,
                width,
                height,
                spec.frame_count,
            )?;
            info!(
                "Loaded {} sheet: {} frames of {}x{}",
                spec.state.animation_name(),
                set.frame_count,
                set.frame_width,
                set.frame_height
            );
            Ok(set)
        };

        let [stand, walk, jump, attack] = &STANDARD_SHEETS;
        Ok(Self::new(
            load_set(stand)?,
            load_set(walk)?,
            load_set(jump)?,
            load_set(attack)?,
        ))
    }

    /// The set drawn for a state
    pub fn get(&self, state: CharacterState) -> &AnimationSet {
        match state {
            CharacterState::Stand => &self.stand,
            CharacterState::Walk => &self.walk,
            CharacterState::Jump => &self.jump,
            CharacterState::Attack => &self.attack,
        }
    }
}
