//! Flip input guard
//!
//! When both opposing directional inputs are held at once, a flip request is
//! ambiguous and applying it causes visible flicker. The guard vetoes flip
//! changes for exactly that case. It starts disabled and, once enabled, stays
//! enabled - there is no disable operation.

use crate::host::{Direction, DirectionalInput};

/// Decision gate consulted before every flip-state change.
#[derive(Debug, Default, Clone, Copy)]
pub struct InputGuard {
    enabled: bool,
    last_valid_left: bool,
    last_valid_right: bool,
}

impl InputGuard {
    pub fn new() -> Self {
        Self::default()
    }

    /// Enable the guard for the lifetime of this value.
    pub fn enable(&mut self) {
        self.enabled = true;
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Poll the host input and decide whether a flip change may proceed.
    ///
    /// Both opposing inputs held → deny. Non-conflicting polls are remembered
    /// as the last valid state (readable via [`last_valid`](Self::last_valid))
    /// so a host can resolve the ambiguity on its own terms. Disabled guards
    /// allow everything and remember nothing.
    pub fn permits_flip(&mut self, input: &dyn DirectionalInput) -> bool {
        if !self.enabled {
            return true;
        }
        let left = input.pressed(Direction::Left);
        let right = input.pressed(Direction::Right);
        if left && right {
            return false;
        }
        self.last_valid_left = left;
        self.last_valid_right = right;
        true
    }

    /// Last non-conflicting `(left, right)` poll observed while enabled.
    pub fn last_valid(&self) -> (bool, bool) {
        (self.last_valid_left, self.last_valid_right)
    }
}
