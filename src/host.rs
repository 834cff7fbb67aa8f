//! Host boundary traits
//!
//! The engine never talks to a concrete game engine. The host supplies
//! entities, input polling, and a per-tick scheduler through these traits;
//! everything here is single-threaded and cooperative, so shared entities are
//! passed around as `Rc<RefCell<dyn Sprite>>`.

use std::cell::RefCell;
use std::rc::Rc;

use crate::bitmap::Bitmap;

/// Stable identity of a host entity.
pub type EntityId = u64;

/// A positioned, renderable entity in the host simulation.
pub trait Sprite {
    /// Stable identity, unique for the entity's lifetime.
    fn id(&self) -> EntityId;

    fn x(&self) -> f64;
    fn y(&self) -> f64;

    /// Move the entity. Also used to re-assert the current position after an
    /// image swap, since some hosts reset position context on image change.
    fn set_position(&mut self, x: f64, y: f64);

    /// The currently displayed image.
    fn image(&self) -> &Bitmap;

    /// Replace the displayed image.
    fn set_image(&mut self, image: Bitmap);
}

/// Shared-ownership form of a sprite, as handed out by a host entity table.
pub type SpriteHandle = Rc<RefCell<dyn Sprite>>;

/// One of the two opposing directional inputs the flip guard watches.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Left,
    Right,
}

/// Host input polling: is a directional input currently held down?
pub trait DirectionalInput {
    fn pressed(&self, direction: Direction) -> bool;
}

/// Default input probe for hosts without directional input: nothing is ever
/// pressed, so the flip guard never vetoes.
#[derive(Debug, Default, Clone, Copy)]
pub struct NeverPressed;

impl DirectionalInput for NeverPressed {
    fn pressed(&self, _direction: Direction) -> bool {
        false
    }
}

/// Host scheduler: run a callback once per simulation tick.
///
/// Registration is fire-and-forget on the host side - there is no unregister.
/// Callers that need to stop a callback gate it through their own flag, see
/// [`crate::tracker::TrackingHandle`].
pub trait Scheduler {
    fn on_tick(&mut self, callback: Box<dyn FnMut()>);
}
