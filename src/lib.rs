//! Spritespin - sprite rotation/flip engine with cached per-entity transform state
//!
//! This library provides functionality to:
//! - Rotate and flip palette-indexed bitmaps (inverse mapping, nearest-neighbor)
//! - Track per-entity transform state and recompute only on change
//! - Point entities at each other, once or continuously per simulation tick
//! - Guard flip changes against ambiguous directional input

pub mod binding;
pub mod bitmap;
pub mod cli;
pub mod export;
pub mod guard;
pub mod host;
pub mod tracker;
pub mod transform;

// Re-export the main types at the crate root for convenience
pub use binding::SpriteTransforms;
pub use bitmap::{Bitmap, BitmapError, Pixel};
pub use guard::InputGuard;
pub use host::{Direction, DirectionalInput, EntityId, NeverPressed, Scheduler, Sprite, SpriteHandle};
pub use tracker::{track, TrackingHandle};
pub use transform::{
    bearing_degrees, flip_vertical, normalize_degrees, rotate, rotate_towards_point,
    rotate_with_margin,
};
