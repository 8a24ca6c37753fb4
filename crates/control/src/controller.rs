use firerange_common::{EntityId, Transform};
use firerange_input::InputState;
use firerange_scene::Scene;
use glam::{Quat, Vec3};
use std::f32::consts::FRAC_PI_2;

/// Rotation applied per tick while a turn key is held, in radians.
pub const TURN_STEP: f32 = 0.02;
/// Distance travelled per tick while a move key is held, in world units.
pub const MOVE_STEP: f32 = 0.1;
/// Vertical offset applied to a freshly spawned bullet, in world units.
pub const BULLET_LIFT: f32 = 0.06;

/// Per-tick movement controller for the blaster.
///
/// Owns no transform state of its own: facing comes from the scene camera and
/// the target entity is rewritten through `Scene::set_transform`. Rotation is
/// applied before facing is read, so a turn taken this tick already steers
/// this tick's translation (the camera rides the blaster).
#[derive(Debug, Clone, Copy)]
pub struct MotionController {
    target: Option<EntityId>,
}

impl MotionController {
    /// Controller driving the given entity.
    pub fn new(target: EntityId) -> Self {
        Self {
            target: Some(target),
        }
    }

    /// Controller with nothing to drive; every update is a no-op.
    pub fn detached() -> Self {
        Self { target: None }
    }

    pub fn target(&self) -> Option<EntityId> {
        self.target
    }

    /// Apply one tick of input to the controlled entity.
    ///
    /// While the modifier is held the rotation block is skipped entirely, so
    /// strafing and turning are mutually exclusive per tick. That mode switch
    /// is deliberate. Simultaneous opposing keys resolve first-checked-wins:
    /// left over right, forward over backward.
    pub fn update(&self, scene: &mut Scene, input: &InputState) {
        let Some(id) = self.target else {
            return;
        };
        if scene.get(id).is_none() {
            tracing::trace!(target = ?id, "controlled entity missing; tick skipped");
            return;
        }

        let modifier = input.modifier();

        if !modifier {
            if input.turn_left() {
                rotate_entity(scene, id, TURN_STEP);
            } else if input.turn_right() {
                rotate_entity(scene, id, -TURN_STEP);
            }
        }

        let facing = scene.camera_forward();

        let Some(entity) = scene.get(id) else {
            return;
        };
        let mut next = entity.transform;

        if input.forward() {
            next.position += facing * MOVE_STEP;
        } else if input.backward() {
            next.position -= facing * MOVE_STEP;
        }

        if modifier {
            if input.turn_left() {
                next.position += rotate_about_y(facing, FRAC_PI_2) * MOVE_STEP;
            } else if input.turn_right() {
                next.position += rotate_about_y(facing, -FRAC_PI_2) * MOVE_STEP;
            }
        }

        scene.set_transform(id, next);
    }
}

fn rotate_entity(scene: &mut Scene, id: EntityId, angle: f32) {
    if let Some(entity) = scene.get(id) {
        let mut next = entity.transform;
        next.rotation = next.rotation * Quat::from_rotation_y(angle);
        scene.set_transform(id, next);
    }
}

/// Rotate `v` about the world-up axis by `angle` radians.
fn rotate_about_y(v: Vec3, angle: f32) -> Vec3 {
    Quat::from_rotation_y(angle) * v
}

/// Spawn pose for a bullet leaving the blaster.
///
/// The bullet starts half the weapon's bounding-box depth ahead along the
/// facing direction, lifted by `BULLET_LIFT`, with the weapon's orientation
/// at that instant.
pub fn bullet_transform(blaster: &Transform, facing: Vec3, half_depth: f32) -> Transform {
    Transform {
        position: blaster.position + facing * half_depth + Vec3::new(0.0, BULLET_LIFT, 0.0),
        rotation: blaster.rotation,
        scale: Vec3::ONE,
    }
}
