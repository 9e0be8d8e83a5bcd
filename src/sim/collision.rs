//! Collision predicate for the otter and drifting obstacles
//!
//! No broad phase: obstacle counts stay small enough that a pairwise check
//! against the single otter is O(active obstacles) per tick.

use glam::Vec3;

use crate::consts::COLLISION_RADIUS;

/// True iff the Euclidean 3D distance between `a` and `b` is strictly less
/// than `COLLISION_RADIUS`. The boundary is excluded: at exactly the radius
/// the pair is not colliding.
#[inline]
pub fn collides(a: Vec3, b: Vec3) -> bool {
    a.distance_squared(b) < COLLISION_RADIUS * COLLISION_RADIUS
}
