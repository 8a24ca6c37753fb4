use crate::camera::Camera;
use firerange_common::{EntityId, MeshHandle, Transform};
use glam::Vec3;
use std::collections::BTreeMap;

/// What an entity is in the gallery.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum EntityKind {
    Target,
    Blaster,
    Bullet,
}

impl EntityKind {
    pub fn label(&self) -> &'static str {
        match self {
            EntityKind::Target => "target",
            EntityKind::Blaster => "blaster",
            EntityKind::Bullet => "bullet",
        }
    }
}

/// Per-entity data stored in the scene.
#[derive(Debug, Clone, Copy)]
pub struct EntityData {
    pub kind: EntityKind,
    pub mesh: MeshHandle,
    pub transform: Transform,
}

/// Directional key light. `position` is read as the direction toward the
/// light; only its direction matters for shading.
#[derive(Debug, Clone, Copy)]
pub struct DirectionalLight {
    pub position: Vec3,
    pub color: [f32; 3],
    pub intensity: f32,
}

impl Default for DirectionalLight {
    fn default() -> Self {
        Self {
            position: Vec3::new(0.0, 3.0, 2.0),
            color: [1.0, 1.0, 1.0],
            intensity: 1.0,
        }
    }
}

/// Flat fill light applied to every surface.
#[derive(Debug, Clone, Copy)]
pub struct AmbientLight {
    pub color: [f32; 3],
    pub intensity: f32,
}

impl Default for AmbientLight {
    fn default() -> Self {
        Self {
            color: [0.25, 0.25, 0.25],
            intensity: 1.0,
        }
    }
}

/// The gallery scene.
///
/// Holds every placed entity plus the lights and the camera. Renderers and
/// inspection tools read from it; mutation goes through `spawn`,
/// `set_transform`, and `step`. Spawned entities accumulate for the session;
/// there is no despawn.
#[derive(Debug, Clone, Default)]
pub struct Scene {
    entities: BTreeMap<EntityId, EntityData>,
    tick: u64,
    pub camera: Camera,
    pub dir_light: DirectionalLight,
    pub ambient_light: AmbientLight,
}

impl Scene {
    /// Create an empty scene at tick 0 with default lights.
    pub fn new() -> Self {
        Self::default()
    }

    /// Current tick count.
    pub fn tick(&self) -> u64 {
        self.tick
    }

    /// Number of entities in the scene.
    pub fn entity_count(&self) -> usize {
        self.entities.len()
    }

    /// Read-only access to all entities (BTreeMap for deterministic iteration).
    pub fn entities(&self) -> &BTreeMap<EntityId, EntityData> {
        &self.entities
    }

    /// Place a new entity. Returns its id.
    pub fn spawn(&mut self, kind: EntityKind, mesh: MeshHandle, transform: Transform) -> EntityId {
        let id = EntityId::new();
        self.entities.insert(
            id,
            EntityData {
                kind,
                mesh,
                transform,
            },
        );
        tracing::debug!(kind = kind.label(), id = ?id, "spawned");
        id
    }

    /// Get a reference to entity data.
    pub fn get(&self, id: EntityId) -> Option<&EntityData> {
        self.entities.get(&id)
    }

    /// Get a mutable reference to entity data.
    pub fn get_mut(&mut self, id: EntityId) -> Option<&mut EntityData> {
        self.entities.get_mut(&id)
    }

    /// Update an entity's transform. Returns false if the entity is missing.
    pub fn set_transform(&mut self, id: EntityId, new: Transform) -> bool {
        if let Some(data) = self.entities.get_mut(&id) {
            data.transform = new;
            true
        } else {
            false
        }
    }

    /// Advance the tick counter by one.
    pub fn step(&mut self) {
        self.tick += 1;
    }

    /// The camera's pose in world space, derived from its parent entity.
    pub fn camera_transform(&self) -> Transform {
        self.camera.world_transform(self)
    }

    /// Unit facing vector derived from the camera's world orientation.
    /// Recomputed on every call, never stored.
    pub fn camera_forward(&self) -> Vec3 {
        self.camera.forward(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Quat;

    #[test]
    fn scene_starts_empty() {
        let s = Scene::new();
        assert_eq!(s.tick(), 0);
        assert_eq!(s.entity_count(), 0);
    }

    #[test]
    fn spawn_and_get() {
        let mut s = Scene::new();
        let id = s.spawn(EntityKind::Target, MeshHandle(0), Transform::default());
        assert_eq!(s.entity_count(), 1);
        assert_eq!(s.get(id).unwrap().kind, EntityKind::Target);
    }

    #[test]
    fn set_transform_missing_entity_is_false() {
        let mut s = Scene::new();
        assert!(!s.set_transform(EntityId::new(), Transform::default()));
    }

    #[test]
    fn set_transform_updates() {
        let mut s = Scene::new();
        let id = s.spawn(EntityKind::Blaster, MeshHandle(0), Transform::default());
        let moved = Transform {
            position: Vec3::new(1.0, 0.0, -2.0),
            ..Transform::default()
        };
        assert!(s.set_transform(id, moved));
        assert_eq!(s.get(id).unwrap().transform.position, moved.position);
    }

    #[test]
    fn step_increments_tick() {
        let mut s = Scene::new();
        s.step();
        s.step();
        assert_eq!(s.tick(), 2);
    }

    #[test]
    fn default_lights_match_gallery_setup() {
        let s = Scene::new();
        assert_eq!(s.dir_light.position, Vec3::new(0.0, 3.0, 2.0));
        assert_eq!(s.ambient_light.color, [0.25, 0.25, 0.25]);
    }

    #[test]
    fn camera_forward_follows_parent_yaw() {
        let mut s = Scene::new();
        let id = s.spawn(
            EntityKind::Blaster,
            MeshHandle(0),
            Transform {
                rotation: Quat::from_rotation_y(std::f32::consts::FRAC_PI_2),
                ..Transform::default()
            },
        );
        s.camera.attach(id, Transform::default());
        let fwd = s.camera_forward();
        assert!((fwd - Vec3::new(-1.0, 0.0, 0.0)).length() < 1e-5);
    }

    #[test]
    fn entities_iterate_in_id_order() {
        let mut s = Scene::new();
        for _ in 0..20 {
            s.spawn(EntityKind::Bullet, MeshHandle(0), Transform::default());
        }
        let keys: Vec<EntityId> = s.entities().keys().copied().collect();
        let mut sorted = keys.clone();
        sorted.sort();
        assert_eq!(keys, sorted);
    }
}
