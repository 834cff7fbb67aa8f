//! Per-entity transform cache and entity binding
//!
//! [`SpriteTransforms`] owns the entity → transform-state table. Every state
//! change recomputes the transformed bitmap from the untouched original (never
//! from a previous output, so repeated calls cannot compound sampling error),
//! caches it, and re-binds the entity's displayed image and position.
//!
//! The cache invariant: whenever a cached output is present it equals
//! `flip(rotate(original, rotation), flipped)` for the current state. Requests
//! that would not change state are complete no-ops and allocate nothing.

use std::collections::HashMap;

use crate::bitmap::Bitmap;
use crate::guard::InputGuard;
use crate::host::{DirectionalInput, EntityId, NeverPressed, Sprite};
use crate::transform::{bearing_degrees, flip_vertical, normalize_degrees, rotate};

/// Cached transform state for one tracked entity.
#[derive(Debug, Clone)]
struct TransformState {
    /// Bitmap captured on first touch; the source of truth for every
    /// recomputation. Never mutated.
    original: Bitmap,
    /// Normalized to `[0, 360)`.
    rotation_degrees: f64,
    flipped_vertically: bool,
    cached_output: Option<Bitmap>,
}

impl TransformState {
    fn capture(original: Bitmap) -> Self {
        TransformState {
            original,
            rotation_degrees: 0.0,
            flipped_vertically: false,
            cached_output: None,
        }
    }

    /// Recompute from `original`: rotation first, then the vertical flip.
    fn compute(&self) -> Bitmap {
        let rotated = rotate(&self.original, self.rotation_degrees);
        if self.flipped_vertically {
            flip_vertical(&rotated)
        } else {
            rotated
        }
    }
}

/// Entity binding layer: transform state table, flip guard, and input probe.
///
/// Entities with no entry behave as rotation 0, unflipped. State is created
/// lazily on the first request that actually changes something and lives until
/// [`remove`](Self::remove) evicts it.
pub struct SpriteTransforms {
    states: HashMap<EntityId, TransformState>,
    guard: InputGuard,
    input: Box<dyn DirectionalInput>,
}

impl SpriteTransforms {
    /// Binding layer for a host without directional input; the flip guard can
    /// be enabled but will never see a pressed input.
    pub fn new() -> Self {
        Self::with_input(NeverPressed)
    }

    /// Binding layer polling the given host input for flip protection.
    pub fn with_input(input: impl DirectionalInput + 'static) -> Self {
        SpriteTransforms {
            states: HashMap::new(),
            guard: InputGuard::new(),
            input: Box::new(input),
        }
    }

    /// Set an entity's rotation, in degrees (any finite value, normalized to
    /// `[0, 360)`).
    ///
    /// A request equal to the current rotation - including 0 for an untracked
    /// entity - is a complete no-op. Otherwise the output is recomputed from
    /// the original, cached, and applied: the displayed image is replaced and
    /// the current position re-asserted, since some hosts reset position
    /// context on image change.
    pub fn set_rotation(&mut self, sprite: &mut dyn Sprite, degrees: f64) {
        let degrees = normalize_degrees(degrees);
        let id = sprite.id();
        if !self.states.contains_key(&id) && degrees == 0.0 {
            return;
        }
        let state = self
            .states
            .entry(id)
            .or_insert_with(|| TransformState::capture(sprite.image().clone()));
        if state.rotation_degrees == degrees {
            return;
        }
        state.rotation_degrees = degrees;
        Self::apply(state, sprite);
    }

    /// Set an entity's vertical-flip state.
    ///
    /// Consulted through the input guard first: a veto makes the whole call a
    /// no-op, with no state mutation and no recompute. The no-op/recompute
    /// contract otherwise matches [`set_rotation`](Self::set_rotation).
    pub fn set_vertical_flip(&mut self, sprite: &mut dyn Sprite, flipped: bool) {
        if !self.guard.permits_flip(self.input.as_ref()) {
            return;
        }
        let id = sprite.id();
        if !self.states.contains_key(&id) && !flipped {
            return;
        }
        let state = self
            .states
            .entry(id)
            .or_insert_with(|| TransformState::capture(sprite.image().clone()));
        if state.flipped_vertically == flipped {
            return;
        }
        state.flipped_vertically = flipped;
        Self::apply(state, sprite);
    }

    /// Rotate `source` to face `target`, plus `offset_degrees`.
    pub fn rotate_towards(
        &mut self,
        source: &mut dyn Sprite,
        target: &dyn Sprite,
        offset_degrees: f64,
    ) {
        let bearing = bearing_degrees(source.x(), source.y(), target.x(), target.y());
        self.set_rotation(source, bearing + offset_degrees);
    }

    /// A fresh copy of the entity's transformed image.
    ///
    /// Read-only: cached output if present, computed on demand from the
    /// original without touching the cache otherwise, and a copy of the live
    /// displayed image for entities with no state at all. Callers may mutate
    /// the result freely.
    pub fn rotated_image(&self, sprite: &dyn Sprite) -> Bitmap {
        match self.states.get(&sprite.id()) {
            Some(state) => match &state.cached_output {
                Some(cached) => cached.clone(),
                None => state.compute(),
            },
            None => sprite.image().clone(),
        }
    }

    /// Current normalized rotation for an entity; 0 when untracked.
    pub fn rotation_degrees(&self, id: EntityId) -> f64 {
        self.states.get(&id).map_or(0.0, |state| state.rotation_degrees)
    }

    /// Current flip state for an entity; false when untracked.
    pub fn is_flipped(&self, id: EntityId) -> bool {
        self.states.get(&id).is_some_and(|state| state.flipped_vertically)
    }

    /// Whether the entity has transform state.
    pub fn is_tracked(&self, id: EntityId) -> bool {
        self.states.contains_key(&id)
    }

    /// Evict an entity's transform state, e.g. on entity destruction. The
    /// entity's displayed image is left as-is. Returns true if state existed.
    pub fn remove(&mut self, id: EntityId) -> bool {
        self.states.remove(&id).is_some()
    }

    /// Enable flip input protection for the lifetime of this value.
    pub fn enable_input_protection(&mut self) {
        self.guard.enable();
    }

    /// Recompute, cache, and push the result onto the entity.
    fn apply(state: &mut TransformState, sprite: &mut dyn Sprite) {
        let output = state.compute();
        state.cached_output = Some(output.clone());
        sprite.set_image(output);
        // Image swaps can reset the host's position context; restore it.
        let (x, y) = (sprite.x(), sprite.y());
        sprite.set_position(x, y);
    }
}

impl Default for SpriteTransforms {
    fn default() -> Self {
        Self::new()
    }
}
