//! Collision collaborators
//!
//! The locomotion controller never resolves collisions itself. It talks to two
//! services through the traits in this module:
//!
//! - [`CollisionMover`] - applies a world-space displacement to the capsule and
//!   reports whether it ended up resting on walkable ground
//! - [`StanceValidator`] - answers capsule-overlap queries used to refuse
//!   stance changes that would embed the capsule in geometry
//!
//! [`StaticWorld`] and [`KinematicCapsule`] are a small reference implementation
//! of both: a floor plane plus axis-aligned blockers. Hosts with a real physics
//! engine implement the traits on their own types instead.
//!
//! # Example
//!
//! ```ignore
//! use strider_engine::physics::collision::{Aabb, CollisionMask, KinematicCapsule, StaticWorld};
//! use glam::Vec3;
//!
//! let mut world = StaticWorld::new(0.0);
//! world.add_blocker(Aabb::new(Vec3::new(-2.0, 1.2, -2.0), Vec3::new(2.0, 1.5, 2.0)), CollisionMask::ALL);
//!
//! let mut body = KinematicCapsule::new(&world, Vec3::ZERO, 0.5, 2.0);
//! let grounded = body.move_by(Vec3::new(0.0, -0.1, 0.0));
//! ```

use glam::Vec3;
use serde::{Deserialize, Serialize};

/// Overlaps closer than this are treated as touching, not penetrating.
const CONTACT_EPSILON: f32 = 1e-4;

/// Bitmask selecting which geometry layers a query considers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CollisionMask(pub u32);

impl CollisionMask {
    /// Matches every layer.
    pub const ALL: Self = Self(u32::MAX);
    /// Matches nothing.
    pub const NONE: Self = Self(0);

    /// Mask containing a single layer.
    pub const fn layer(index: u32) -> Self {
        Self(1 << index)
    }

    /// True if the two masks share at least one layer.
    #[inline]
    pub fn intersects(self, other: Self) -> bool {
        self.0 & other.0 != 0
    }
}

impl Default for CollisionMask {
    fn default() -> Self {
        Self::ALL
    }
}

/// Swept-capsule mover owned by the host physics.
pub trait CollisionMover {
    /// Move the capsule by `displacement` (world space), sliding against geometry.
    ///
    /// Returns `true` when the capsule rests on walkable ground after the move.
    fn move_by(&mut self, displacement: Vec3) -> bool;

    /// Capsule radius in meters.
    fn radius(&self) -> f32;

    /// World position of the capsule base (the foot anchor).
    fn foot_position(&self) -> Vec3;
}

/// Capsule-overlap query owned by the host physics.
pub trait StanceValidator {
    /// True if a capsule between the sphere centres `start` and `end` with the
    /// given `radius` overlaps any geometry on the layers in `mask`.
    fn overlaps_capsule(&self, start: Vec3, end: Vec3, radius: f32, mask: CollisionMask) -> bool;
}

/// Axis-aligned box.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Aabb {
    pub min: Vec3,
    pub max: Vec3,
}

impl Aabb {
    /// Create a box from two corners in any order.
    pub fn new(a: Vec3, b: Vec3) -> Self {
        Self {
            min: a.min(b),
            max: a.max(b),
        }
    }

    /// Closest point inside the box to `point`.
    #[inline]
    pub fn closest_point(&self, point: Vec3) -> Vec3 {
        point.clamp(self.min, self.max)
    }

    /// Distance from `point` to the box (zero inside).
    #[inline]
    pub fn distance_to_point(&self, point: Vec3) -> f32 {
        (point - self.closest_point(point)).length()
    }

    /// Shortest distance from the segment `a..b` to the box.
    ///
    /// The distance along a segment to a convex set is convex in the segment
    /// parameter, so a ternary search finds the minimum.
    pub fn distance_to_segment(&self, a: Vec3, b: Vec3) -> f32 {
        let mut lo = 0.0_f32;
        let mut hi = 1.0_f32;
        for _ in 0..48 {
            let m1 = lo + (hi - lo) / 3.0;
            let m2 = hi - (hi - lo) / 3.0;
            if self.distance_to_point(a.lerp(b, m1)) <= self.distance_to_point(a.lerp(b, m2)) {
                hi = m2;
            } else {
                lo = m1;
            }
        }
        self.distance_to_point(a.lerp(b, (lo + hi) * 0.5))
            .min(self.distance_to_point(a))
            .min(self.distance_to_point(b))
    }

    /// Ray intersection using the slab method.
    ///
    /// # Arguments
    /// * `origin` - Ray origin
    /// * `dir` - Ray direction (normalized)
    ///
    /// # Returns
    /// Distance to the nearest intersection in front of the origin, or `None`.
    pub fn ray_intersect(&self, origin: Vec3, dir: Vec3) -> Option<f32> {
        let inv = |d: f32| if d.abs() > 1e-10 { 1.0 / d } else { f32::MAX * d.signum() };
        let inv_dir = Vec3::new(inv(dir.x), inv(dir.y), inv(dir.z));

        let t1 = (self.min - origin) * inv_dir;
        let t2 = (self.max - origin) * inv_dir;

        let t_min = t1.min(t2).max_element();
        let t_max = t1.max(t2).min_element();

        if t_max >= t_min && t_max >= 0.0 {
            Some(if t_min >= 0.0 { t_min } else { t_max })
        } else {
            None
        }
    }
}

/// A static blocker with the layers it belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Blocker {
    pub bounds: Aabb,
    pub layers: CollisionMask,
}

/// Flat floor plus a set of axis-aligned blockers.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StaticWorld {
    /// Height of the infinite floor plane
    pub floor_height: f32,
    blockers: Vec<Blocker>,
}

impl StaticWorld {
    /// Create an empty world with a floor at `floor_height`.
    pub fn new(floor_height: f32) -> Self {
        Self {
            floor_height,
            blockers: Vec::new(),
        }
    }

    /// Add a blocker on the given layers.
    pub fn add_blocker(&mut self, bounds: Aabb, layers: CollisionMask) {
        self.blockers.push(Blocker { bounds, layers });
    }

    /// All blockers in insertion order.
    pub fn blockers(&self) -> &[Blocker] {
        &self.blockers
    }

    /// Highest walkable surface under a capsule of `radius` whose base is at
    /// `foot`, considering only surfaces at or below `foot.y + step`.
    pub fn support_height(&self, foot: Vec3, radius: f32, step: f32) -> f32 {
        self.blockers
            .iter()
            .filter(|b| {
                let top = b.bounds.max.y;
                let probe = Vec3::new(foot.x, top, foot.z);
                top <= foot.y + step && b.bounds.distance_to_point(probe) < radius
            })
            .map(|b| b.bounds.max.y)
            .fold(self.floor_height, f32::max)
    }

    /// Free vertical space above `foot`, capped at `max_distance`.
    pub fn headroom(&self, foot: Vec3, max_distance: f32) -> f32 {
        self.blockers
            .iter()
            .filter(|b| b.bounds.min.y >= foot.y)
            .filter_map(|b| b.bounds.ray_intersect(foot, Vec3::Y))
            .fold(max_distance, f32::min)
    }
}

impl StanceValidator for StaticWorld {
    fn overlaps_capsule(&self, start: Vec3, end: Vec3, radius: f32, mask: CollisionMask) -> bool {
        if start.y.min(end.y) - radius < self.floor_height - CONTACT_EPSILON {
            return true;
        }
        self.blockers
            .iter()
            .filter(|b| b.layers.intersects(mask))
            .any(|b| b.bounds.distance_to_segment(start, end) < radius - CONTACT_EPSILON)
    }
}

/// Kinematic capsule moving through a [`StaticWorld`].
///
/// Horizontal motion slides along blockers one axis at a time; vertical motion
/// lands on the highest support below and stops under ceilings.
#[derive(Debug, Clone)]
pub struct KinematicCapsule<'w> {
    world: &'w StaticWorld,
    foot: Vec3,
    radius: f32,
    height: f32,
    grounded: bool,
}

impl<'w> KinematicCapsule<'w> {
    /// Create a capsule with its base at `foot`.
    pub fn new(world: &'w StaticWorld, foot: Vec3, radius: f32, height: f32) -> Self {
        Self {
            world,
            foot,
            radius,
            height: height.max(radius * 2.0),
            grounded: false,
        }
    }

    /// Capsule height in meters.
    pub fn height(&self) -> f32 {
        self.height
    }

    /// Resize the capsule, e.g. to follow the active stance's collider height.
    pub fn set_height(&mut self, height: f32) {
        self.height = height.max(self.radius * 2.0);
    }

    /// Grounded flag from the last move.
    pub fn is_grounded(&self) -> bool {
        self.grounded
    }

    /// Place the capsule without sweeping.
    pub fn teleport(&mut self, foot: Vec3) {
        self.foot = foot;
        self.grounded = false;
    }

    fn blocked_at(&self, foot: Vec3) -> bool {
        let start = foot + Vec3::Y * self.radius;
        let end = foot + Vec3::Y * (self.height - self.radius);
        self.world
            .blockers
            .iter()
            .any(|b| b.bounds.distance_to_segment(start, end) < self.radius - CONTACT_EPSILON)
    }

    fn slide_horizontal(&mut self, displacement: Vec3) {
        let candidates = [
            Vec3::new(displacement.x, 0.0, displacement.z),
            Vec3::new(displacement.x, 0.0, 0.0),
            Vec3::new(0.0, 0.0, displacement.z),
        ];
        let free = candidates
            .into_iter()
            .filter(|c| c.length_squared() > 0.0)
            .find(|c| !self.blocked_at(self.foot + *c));
        if let Some(step) = free {
            self.foot += step;
        }
    }

    fn move_vertical(&mut self, dy: f32) {
        let target_y = self.foot.y + dy;

        if dy <= 0.0 {
            let support = self.world.support_height(self.foot, self.radius, CONTACT_EPSILON);
            if target_y <= support {
                self.foot.y = support;
                self.grounded = true;
            } else {
                self.foot.y = target_y;
                self.grounded = false;
            }
            return;
        }

        let candidate = Vec3::new(self.foot.x, target_y, self.foot.z);
        if self.blocked_at(candidate) {
            let ceiling = self
                .world
                .blockers
                .iter()
                .filter(|b| b.bounds.min.y >= self.foot.y + self.height - CONTACT_EPSILON)
                .filter(|b| {
                    let probe = Vec3::new(self.foot.x, b.bounds.min.y, self.foot.z);
                    b.bounds.distance_to_point(probe) < self.radius
                })
                .map(|b| b.bounds.min.y)
                .fold(f32::MAX, f32::min);
            if ceiling < f32::MAX {
                self.foot.y = (ceiling - self.height).max(self.foot.y);
            }
        } else {
            self.foot.y = target_y;
        }
        self.grounded = false;
    }
}

impl CollisionMover for KinematicCapsule<'_> {
    fn move_by(&mut self, displacement: Vec3) -> bool {
        self.slide_horizontal(displacement);
        self.move_vertical(displacement.y);
        self.grounded
    }

    fn radius(&self) -> f32 {
        self.radius
    }

    fn foot_position(&self) -> Vec3 {
        self.foot
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPSILON: f32 = 0.001;

    fn approx_eq(a: f32, b: f32) -> bool {
        (a - b).abs() < EPSILON
    }

    fn low_ceiling_world() -> StaticWorld {
        let mut world = StaticWorld::new(0.0);
        world.add_blocker(
            Aabb::new(Vec3::new(-2.0, 1.4, -2.0), Vec3::new(2.0, 1.8, 2.0)),
            CollisionMask::layer(0),
        );
        world
    }

    #[test]
    fn test_mask_intersection() {
        assert!(CollisionMask::ALL.intersects(CollisionMask::layer(3)));
        assert!(!CollisionMask::NONE.intersects(CollisionMask::ALL));
        assert!(!CollisionMask::layer(1).intersects(CollisionMask::layer(2)));
    }

    #[test]
    fn test_ray_hits_box_from_front() {
        let aabb = Aabb::new(Vec3::splat(-1.0), Vec3::splat(1.0));
        let t = aabb.ray_intersect(Vec3::new(0.0, 0.0, -5.0), Vec3::Z);
        assert!(approx_eq(t.unwrap_or(f32::NAN), 4.0));
    }

    #[test]
    fn test_ray_behind_origin_misses() {
        let aabb = Aabb::new(Vec3::splat(-1.0), Vec3::splat(1.0));
        assert!(aabb.ray_intersect(Vec3::new(0.0, 0.0, 5.0), Vec3::Z).is_none());
    }

    #[test]
    fn test_segment_distance() {
        let aabb = Aabb::new(Vec3::new(-1.0, 2.0, -1.0), Vec3::new(1.0, 3.0, 1.0));
        let d = aabb.distance_to_segment(Vec3::new(0.0, 0.0, 0.0), Vec3::new(0.0, 1.5, 0.0));
        assert!(approx_eq(d, 0.5));

        let d = aabb.distance_to_segment(Vec3::new(-3.0, 2.5, 0.0), Vec3::new(3.0, 2.5, 0.0));
        assert!(approx_eq(d, 0.0));
    }

    #[test]
    fn test_overlap_respects_height_and_mask() {
        let world = low_ceiling_world();
        let radius = 0.5;
        let foot = Vec3::ZERO;

        // Standing capsule reaches into the ceiling
        let start = foot + Vec3::Y * radius;
        let end = foot + Vec3::Y * (1.8 - radius);
        assert!(world.overlaps_capsule(start, end, radius, CollisionMask::ALL));

        // Ignored when the ceiling layer is masked out
        assert!(!world.overlaps_capsule(start, end, radius, CollisionMask::layer(5)));

        // Short capsule fits under it
        let end = foot + Vec3::Y * (1.2 - radius);
        assert!(!world.overlaps_capsule(start, end, radius, CollisionMask::ALL));
    }

    #[test]
    fn test_capsule_lands_on_floor() {
        let world = StaticWorld::new(0.0);
        let mut body = KinematicCapsule::new(&world, Vec3::new(0.0, 0.25, 0.0), 0.5, 2.0);

        assert!(!body.move_by(Vec3::new(0.0, -0.1, 0.0)));
        assert!(approx_eq(body.foot_position().y, 0.15));

        assert!(body.move_by(Vec3::new(0.0, -0.5, 0.0)));
        assert!(approx_eq(body.foot_position().y, 0.0));
    }

    #[test]
    fn test_capsule_stands_on_blocker() {
        let mut world = StaticWorld::new(0.0);
        world.add_blocker(
            Aabb::new(Vec3::new(-1.0, 0.0, -1.0), Vec3::new(1.0, 0.5, 1.0)),
            CollisionMask::ALL,
        );
        let mut body = KinematicCapsule::new(&world, Vec3::new(0.0, 0.6, 0.0), 0.4, 1.8);

        assert!(body.move_by(Vec3::new(0.0, -0.3, 0.0)));
        assert!(approx_eq(body.foot_position().y, 0.5));
    }

    #[test]
    fn test_capsule_slides_along_wall() {
        let mut world = StaticWorld::new(0.0);
        world.add_blocker(
            Aabb::new(Vec3::new(1.0, 0.0, -5.0), Vec3::new(2.0, 3.0, 5.0)),
            CollisionMask::ALL,
        );
        let mut body = KinematicCapsule::new(&world, Vec3::new(0.4, 0.0, 0.0), 0.5, 1.8);

        body.move_by(Vec3::new(0.5, 0.0, -0.5));
        let foot = body.foot_position();
        assert!(approx_eq(foot.x, 0.4));
        assert!(approx_eq(foot.z, -0.5));
    }

    #[test]
    fn test_capsule_stops_under_ceiling() {
        let world = low_ceiling_world();
        let mut body = KinematicCapsule::new(&world, Vec3::ZERO, 0.3, 1.2);

        body.move_by(Vec3::new(0.0, 1.0, 0.0));
        assert!(approx_eq(body.foot_position().y, 0.2));
        assert!(!body.is_grounded());
    }

    #[test]
    fn test_resized_capsule_fits_under_ceiling() {
        let world = low_ceiling_world();
        let mut body = KinematicCapsule::new(&world, Vec3::new(3.0, 0.0, 0.0), 0.5, 1.8);

        body.move_by(Vec3::new(-1.0, 0.0, 0.0));
        assert!(approx_eq(body.foot_position().x, 3.0));

        body.set_height(1.2);
        body.move_by(Vec3::new(-1.0, 0.0, 0.0));
        assert!(approx_eq(body.foot_position().x, 2.0));

        body.set_height(0.1);
        assert_eq!(body.height(), 1.0);
    }

    #[test]
    fn test_headroom() {
        let world = low_ceiling_world();
        assert!(approx_eq(world.headroom(Vec3::ZERO, 10.0), 1.4));
        assert!(approx_eq(world.headroom(Vec3::new(5.0, 0.0, 0.0), 10.0), 10.0));
    }
}
