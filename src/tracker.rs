//! Continuous directional tracking
//!
//! [`track`] points a source sprite at a target once, then keeps re-pointing
//! it every simulation tick through the host [`Scheduler`]. The host offers no
//! unregister, so the per-tick closure holds only weak references and a cancel
//! flag: cancelled or dangling, it degrades to a no-op tick. An uncancelled
//! handle (dropped or kept) leaves the callback re-pointing the sprite for the
//! simulation's whole lifetime.

use std::cell::{Cell, RefCell};
use std::rc::{Rc, Weak};

use crate::binding::SpriteTransforms;
use crate::host::{Scheduler, Sprite, SpriteHandle};

/// Cancellation handle for a running [`track`] registration.
///
/// Dropping the handle does not cancel; only an explicit
/// [`cancel`](Self::cancel) stops the per-tick recomputation.
#[derive(Debug, Clone)]
pub struct TrackingHandle {
    cancelled: Rc<Cell<bool>>,
}

impl TrackingHandle {
    pub fn cancel(&self) {
        self.cancelled.set(true);
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancelled.get()
    }
}

/// Rotate `source` towards `target` (plus offset) now and on every future
/// tick, until the returned handle is cancelled or either sprite is dropped.
///
/// Each tick re-checks that the transform table and both sprites are still
/// alive before recomputing, so external deallocation between ticks is safe.
/// A sprite tracking itself has no defined bearing and is skipped.
pub fn track(
    transforms: &Rc<RefCell<SpriteTransforms>>,
    source: &SpriteHandle,
    target: &SpriteHandle,
    offset_degrees: f64,
    scheduler: &mut dyn Scheduler,
) -> TrackingHandle {
    apply(transforms, source, target, offset_degrees);

    let cancelled = Rc::new(Cell::new(false));
    let flag = Rc::clone(&cancelled);
    let transforms: Weak<RefCell<SpriteTransforms>> = Rc::downgrade(transforms);
    let source: Weak<RefCell<dyn Sprite>> = Rc::downgrade(source);
    let target: Weak<RefCell<dyn Sprite>> = Rc::downgrade(target);

    scheduler.on_tick(Box::new(move || {
        if flag.get() {
            return;
        }
        let (Some(transforms), Some(source), Some(target)) =
            (transforms.upgrade(), source.upgrade(), target.upgrade())
        else {
            return;
        };
        apply(&transforms, &source, &target, offset_degrees);
    }));

    TrackingHandle { cancelled }
}

fn apply(
    transforms: &Rc<RefCell<SpriteTransforms>>,
    source: &SpriteHandle,
    target: &SpriteHandle,
    offset_degrees: f64,
) {
    if Rc::ptr_eq(source, target) {
        return;
    }
    let mut transforms = transforms.borrow_mut();
    let mut source = source.borrow_mut();
    let target = target.borrow();
    transforms.rotate_towards(&mut *source, &*target, offset_degrees);
}
