//! Capacity-checked shape storage with typed insertion-order ids.

use std::marker::PhantomData;

use crate::foundation::error::{RicochetError, RicochetResult, ShapeKind};
use crate::scene::model::{Circle, Rectangle};

/// Per-kind capacity of a [`SceneStore`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize)]
pub struct SceneLimits {
    /// Most circles a scene may hold.
    pub max_circles: usize,
    /// Most rectangles a scene may hold.
    pub max_rectangles: usize,
}

impl Default for SceneLimits {
    fn default() -> Self {
        Self {
            max_circles: 100,
            max_rectangles: 100,
        }
    }
}

/// Insertion-order index into a [`ShapeArena`].
pub struct ShapeId<T> {
    index: u32,
    _kind: PhantomData<fn() -> T>,
}

impl<T> ShapeId<T> {
    fn new(index: u32) -> Self {
        Self {
            index,
            _kind: PhantomData,
        }
    }

    /// Position in insertion order.
    pub fn index(self) -> usize {
        self.index as usize
    }
}

impl<T> Clone for ShapeId<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for ShapeId<T> {}

impl<T> PartialEq for ShapeId<T> {
    fn eq(&self, other: &Self) -> bool {
        self.index == other.index
    }
}

impl<T> Eq for ShapeId<T> {}

impl<T> std::fmt::Debug for ShapeId<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_tuple("ShapeId").field(&self.index).finish()
    }
}

/// Id of a stored [`Circle`].
pub type CircleId = ShapeId<Circle>;
/// Id of a stored [`Rectangle`].
pub type RectangleId = ShapeId<Rectangle>;

/// Append-only, capacity-checked collection of one shape kind.
#[derive(Clone, Debug, PartialEq)]
pub struct ShapeArena<T> {
    kind: ShapeKind,
    capacity: usize,
    items: Vec<T>,
}

impl<T> ShapeArena<T> {
    /// Empty arena holding at most `capacity` items of `kind`.
    pub fn new(kind: ShapeKind, capacity: usize) -> Self {
        Self {
            kind,
            capacity,
            items: Vec::with_capacity(capacity.min(1024)),
        }
    }

    /// Append `item`, or fail without touching existing items when full.
    pub fn push(&mut self, item: T) -> RicochetResult<ShapeId<T>> {
        if self.items.len() >= self.capacity {
            return Err(RicochetError::CapacityExceeded {
                kind: self.kind,
                capacity: self.capacity,
            });
        }
        let index = u32::try_from(self.items.len()).map_err(|_| RicochetError::CapacityExceeded {
            kind: self.kind,
            capacity: self.capacity,
        })?;
        self.items.push(item);
        Ok(ShapeId::new(index))
    }

    /// Items stored.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Whether nothing is stored.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Most items accepted.
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Items in insertion order.
    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.items.iter()
    }

    pub(crate) fn iter_mut(&mut self) -> std::slice::IterMut<'_, T> {
        self.items.iter_mut()
    }

    /// Items in insertion order.
    pub fn as_slice(&self) -> &[T] {
        &self.items
    }
}

impl<'a, T> IntoIterator for &'a ShapeArena<T> {
    type Item = &'a T;
    type IntoIter = std::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Every shape of a scene, populated during load and identity-stable afterwards.
#[derive(Clone, Debug, PartialEq)]
pub struct SceneStore {
    circles: ShapeArena<Circle>,
    rectangles: ShapeArena<Rectangle>,
}

impl Default for SceneStore {
    fn default() -> Self {
        Self::new(SceneLimits::default())
    }
}

impl SceneStore {
    /// Empty store with per-kind `limits`.
    pub fn new(limits: SceneLimits) -> Self {
        Self {
            circles: ShapeArena::new(ShapeKind::Circle, limits.max_circles),
            rectangles: ShapeArena::new(ShapeKind::Rectangle, limits.max_rectangles),
        }
    }

    /// Append a circle; fails when the circle arena is full.
    pub fn insert_circle(&mut self, circle: Circle) -> RicochetResult<CircleId> {
        self.circles.push(circle)
    }

    /// Append a rectangle; fails when the rectangle arena is full.
    pub fn insert_rectangle(&mut self, rectangle: Rectangle) -> RicochetResult<RectangleId> {
        self.rectangles.push(rectangle)
    }

    /// All circles.
    pub fn circles(&self) -> &ShapeArena<Circle> {
        &self.circles
    }

    /// All rectangles.
    pub fn rectangles(&self) -> &ShapeArena<Rectangle> {
        &self.rectangles
    }

    pub(crate) fn circles_mut(&mut self) -> &mut ShapeArena<Circle> {
        &mut self.circles
    }

    pub(crate) fn rectangles_mut(&mut self) -> &mut ShapeArena<Rectangle> {
        &mut self.rectangles
    }

    /// Shapes of both kinds.
    pub fn len(&self) -> usize {
        self.circles.len() + self.rectangles.len()
    }

    /// Whether the store holds no shapes.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
#[path = "../../tests/unit/scene/store.rs"]
mod tests;
