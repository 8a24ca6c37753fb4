use glam::{Quat, Vec3};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for an entity in the scene.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct EntityId(pub Uuid);

impl EntityId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for EntityId {
    fn default() -> Self {
        Self::new()
    }
}

/// A handle referencing an uploaded mesh.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct MeshHandle(pub u64);

/// Spatial transform: position, rotation, scale.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Transform {
    pub position: Vec3,
    pub rotation: Quat,
    pub scale: Vec3,
}

impl Default for Transform {
    fn default() -> Self {
        Self {
            position: Vec3::ZERO,
            rotation: Quat::IDENTITY,
            scale: Vec3::ONE,
        }
    }
}

impl Transform {
    /// Map a point from this transform's local space into its parent space.
    pub fn transform_point(&self, point: Vec3) -> Vec3 {
        self.position + self.rotation * (self.scale * point)
    }

    /// Compose with a child transform: `self` is the parent, `local` the child.
    pub fn compose(&self, local: &Transform) -> Transform {
        Transform {
            position: self.transform_point(local.position),
            rotation: self.rotation * local.rotation,
            scale: self.scale * local.scale,
        }
    }
}

/// Axis-aligned bounding box.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Aabb {
    pub min: Vec3,
    pub max: Vec3,
}

impl Aabb {
    pub const ZERO: Self = Self {
        min: Vec3::ZERO,
        max: Vec3::ZERO,
    };

    pub fn new(min: Vec3, max: Vec3) -> Self {
        Self { min, max }
    }

    /// Smallest box enclosing both boxes.
    pub fn union(&self, other: Aabb) -> Aabb {
        Aabb {
            min: self.min.min(other.min),
            max: self.max.max(other.max),
        }
    }

    pub fn size(&self) -> Vec3 {
        self.max - self.min
    }

    /// Half the box's extent along Z. Projectiles spawn this far ahead of the
    /// weapon's origin so they clear the muzzle.
    pub fn half_depth(&self) -> f32 {
        self.size().z * 0.5
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn entity_id_uniqueness() {
        let a = EntityId::new();
        let b = EntityId::new();
        assert_ne!(a, b);
    }

    #[test]
    fn transform_default_is_identity() {
        let t = Transform::default();
        assert_eq!(t.position, Vec3::ZERO);
        assert_eq!(t.rotation, Quat::IDENTITY);
        assert_eq!(t.scale, Vec3::ONE);
    }

    #[test]
    fn transform_point_identity() {
        let t = Transform::default();
        let p = Vec3::new(1.0, 2.0, 3.0);
        assert_eq!(t.transform_point(p), p);
    }

    #[test]
    fn transform_point_translates_and_rotates() {
        let t = Transform {
            position: Vec3::new(0.0, 0.0, -1.0),
            rotation: Quat::from_rotation_y(std::f32::consts::FRAC_PI_2),
            ..Transform::default()
        };
        // +90 deg about Y maps -Z to -X.
        let mapped = t.transform_point(Vec3::new(0.0, 0.0, -1.0));
        assert!((mapped - Vec3::new(-1.0, 0.0, -1.0)).length() < 1e-5);
    }

    #[test]
    fn compose_applies_parent_then_local() {
        let parent = Transform {
            position: Vec3::new(0.0, 0.0, -1.0),
            rotation: Quat::from_rotation_y(std::f32::consts::FRAC_PI_2),
            ..Transform::default()
        };
        let local = Transform {
            position: Vec3::new(0.0, 0.5, 1.0),
            ..Transform::default()
        };
        let world = parent.compose(&local);
        // Local +Z becomes world -X under the parent's yaw.
        assert!((world.position - Vec3::new(-1.0, 0.5, -1.0)).length() < 1e-5);
        assert!((world.rotation * Vec3::NEG_Z - Vec3::new(-1.0, 0.0, 0.0)).length() < 1e-5);
    }

    #[test]
    fn aabb_union_and_size() {
        let a = Aabb::new(Vec3::new(-1.0, 0.0, -2.0), Vec3::new(1.0, 1.0, 0.0));
        let b = Aabb::new(Vec3::new(0.0, -1.0, -1.0), Vec3::new(2.0, 0.5, 1.0));
        let u = a.union(b);
        assert_eq!(u.min, Vec3::new(-1.0, -1.0, -2.0));
        assert_eq!(u.max, Vec3::new(2.0, 1.0, 1.0));
        assert_eq!(u.size(), Vec3::new(3.0, 2.0, 3.0));
    }

    #[test]
    fn aabb_half_depth() {
        let a = Aabb::new(Vec3::new(-0.5, -0.5, -0.7), Vec3::new(0.5, 0.5, 0.7));
        assert!((a.half_depth() - 0.7).abs() < 1e-6);
    }
}
