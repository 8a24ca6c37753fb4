use crate::scene::Scene;
use firerange_common::{EntityId, Transform};
use glam::{Mat4, Vec3};

/// Perspective camera that may ride a scene entity.
///
/// World pose = parent transform composed with the local offset. The camera
/// holds a handle to its parent rather than extending any scene type; with no
/// parent (or a parent that is gone) the local offset alone is the pose, so
/// facing stays well-defined.
#[derive(Debug, Clone, Copy)]
pub struct Camera {
    pub parent: Option<EntityId>,
    pub local: Transform,
    pub fov: f32,
    pub aspect: f32,
    pub near: f32,
    pub far: f32,
}

impl Default for Camera {
    fn default() -> Self {
        Self {
            parent: None,
            local: Transform::default(),
            fov: 60.0_f32.to_radians(),
            aspect: 16.0 / 9.0,
            near: 0.1,
            far: 100.0,
        }
    }
}

impl Camera {
    /// Parent the camera to an entity with the given local offset.
    pub fn attach(&mut self, parent: EntityId, local: Transform) {
        self.parent = Some(parent);
        self.local = local;
    }

    /// The camera's pose in world space.
    pub fn world_transform(&self, scene: &Scene) -> Transform {
        match self.parent.and_then(|id| scene.get(id)) {
            Some(data) => data.transform.compose(&self.local),
            None => self.local,
        }
    }

    /// Unit vector the camera looks along (-Z in camera space).
    pub fn forward(&self, scene: &Scene) -> Vec3 {
        (self.world_transform(scene).rotation * Vec3::NEG_Z).normalize()
    }

    pub fn view_matrix(&self, scene: &Scene) -> Mat4 {
        let world = self.world_transform(scene);
        Mat4::look_to_rh(world.position, world.rotation * Vec3::NEG_Z, Vec3::Y)
    }

    pub fn projection_matrix(&self) -> Mat4 {
        Mat4::perspective_rh(self.fov, self.aspect, self.near, self.far)
    }

    pub fn view_projection(&self, scene: &Scene) -> Mat4 {
        self.projection_matrix() * self.view_matrix(scene)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scene::EntityKind;
    use firerange_common::MeshHandle;
    use glam::Quat;

    #[test]
    fn unparented_camera_uses_local_pose() {
        let scene = Scene::new();
        let mut cam = Camera::default();
        cam.local.position = Vec3::new(0.0, 2.0, 5.0);
        let world = cam.world_transform(&scene);
        assert_eq!(world.position, Vec3::new(0.0, 2.0, 5.0));
        assert!((cam.forward(&scene) - Vec3::NEG_Z).length() < 1e-6);
    }

    #[test]
    fn parented_camera_composes_with_entity() {
        let mut scene = Scene::new();
        let id = scene.spawn(
            EntityKind::Blaster,
            MeshHandle(0),
            Transform {
                position: Vec3::new(0.0, 0.0, -1.0),
                ..Transform::default()
            },
        );
        scene.camera.attach(
            id,
            Transform {
                position: Vec3::new(0.0, 0.5, 1.0),
                ..Transform::default()
            },
        );
        let world = scene.camera_transform();
        assert!((world.position - Vec3::new(0.0, 0.5, 0.0)).length() < 1e-6);
    }

    #[test]
    fn missing_parent_falls_back_to_local() {
        let scene = Scene::new();
        let mut cam = Camera::default();
        cam.attach(EntityId::new(), Transform::default());
        assert_eq!(cam.world_transform(&scene).position, Vec3::ZERO);
    }

    #[test]
    fn forward_tracks_parent_rotation() {
        let mut scene = Scene::new();
        let id = scene.spawn(
            EntityKind::Blaster,
            MeshHandle(0),
            Transform {
                rotation: Quat::from_rotation_y(0.02),
                ..Transform::default()
            },
        );
        scene.camera.attach(id, Transform::default());
        let expected = Quat::from_rotation_y(0.02) * Vec3::NEG_Z;
        assert!((scene.camera_forward() - expected).length() < 1e-6);
    }

    #[test]
    fn view_projection_is_finite() {
        let scene = Scene::new();
        let cam = Camera::default();
        let vp = cam.view_projection(&scene);
        assert!(!vp.col(0).x.is_nan());
    }
}
