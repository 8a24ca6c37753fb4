use firerange_scene::Scene;

/// Renderer-agnostic interface. All renderers implement this trait.
///
/// The renderer reads scene state and produces output. It never mutates the
/// scene — scene truth stays with the tick loop.
pub trait Renderer {
    /// The output type produced by this renderer.
    type Output;

    /// Render one frame from the given scene state.
    fn render(&self, scene: &Scene) -> Self::Output;
}

/// Debug text renderer.
///
/// Produces a human-readable listing of the scene. Used for CLI output,
/// logging, and testing the render interface without a GPU.
#[derive(Debug, Default)]
pub struct DebugTextRenderer;

impl DebugTextRenderer {
    pub fn new() -> Self {
        Self
    }
}

impl Renderer for DebugTextRenderer {
    type Output = String;

    fn render(&self, scene: &Scene) -> String {
        let mut out = String::new();
        out.push_str(&format!(
            "=== Scene (tick={}, entities={}) ===\n",
            scene.tick(),
            scene.entity_count()
        ));

        let cam = scene.camera_transform();
        let facing = scene.camera_forward();
        out.push_str(&format!(
            "Camera: eye=({:.2}, {:.2}, {:.2}) facing=({:.2}, {:.2}, {:.2})\n",
            cam.position.x, cam.position.y, cam.position.z, facing.x, facing.y, facing.z
        ));

        for (id, data) in scene.entities() {
            let p = data.transform.position;
            out.push_str(&format!(
                "  [{:.8}] {:<7} pos=({:.2}, {:.2}, {:.2})\n",
                &id.0.to_string()[..8],
                data.kind.label(),
                p.x,
                p.y,
                p.z
            ));
        }

        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use firerange_common::{MeshHandle, Transform};
    use firerange_scene::EntityKind;
    use glam::Vec3;

    #[test]
    fn debug_renderer_empty_scene() {
        let scene = Scene::new();
        let output = DebugTextRenderer::new().render(&scene);
        assert!(output.contains("tick=0"));
        assert!(output.contains("entities=0"));
    }

    #[test]
    fn debug_renderer_lists_kinds() {
        let mut scene = Scene::new();
        scene.spawn(EntityKind::Target, MeshHandle(0), Transform::default());
        scene.spawn(
            EntityKind::Blaster,
            MeshHandle(1),
            Transform {
                position: Vec3::new(0.0, 0.0, -1.0),
                ..Transform::default()
            },
        );

        let output = DebugTextRenderer::new().render(&scene);
        assert!(output.contains("entities=2"));
        assert!(output.contains("target"));
        assert!(output.contains("blaster"));
        assert!(output.contains("pos="));
    }

    #[test]
    fn debug_renderer_reports_camera_facing() {
        let scene = Scene::new();
        let output = DebugTextRenderer::new().render(&scene);
        assert!(output.contains("facing=(0.00, 0.00, -1.00)"));
    }
}
