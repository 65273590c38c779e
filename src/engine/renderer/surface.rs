// Immediate-mode drawing interface used by game code

use super::TextureHandle;
use crate::core::math::Rect;
use glam::Vec2;

/// RGBA color with components in [0, 1]
pub type Color = [f32; 4];

pub const WHITE: Color = [1.0, 1.0, 1.0, 1.0];

/// A 2D drawing target with a transform stack.
///
/// Coordinates are screen pixels, origin top-left, y pointing down.
/// `translate` and `scale` compose onto the current transform; `push_transform`
/// and `pop_transform` save and restore it.
pub trait RenderSurface {
    /// Fill the whole surface with a color and drop anything drawn so far
    fn clear(&mut self, color: Color);

    fn push_transform(&mut self);

    fn pop_transform(&mut self);

    fn translate(&mut self, offset: Vec2);

    fn scale(&mut self, factor: Vec2);

    /// Draw the `source` sub-rectangle of `texture` into `dest`, where `dest`
    /// is expressed in the current transform's coordinates
    fn draw_image(&mut self, texture: TextureHandle, dest: Rect, source: Rect);
}
