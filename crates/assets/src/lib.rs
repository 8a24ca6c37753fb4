//! Asset import and registry: glTF meshes, content-addressed handles.
//!
//! Meshes are identified by content-addressed hashes. The renderer consumes
//! CPU meshes by handle, never by raw file paths. Loading is one-shot and
//! sequential during setup; a failed load propagates and is fatal to setup —
//! there is no retry or fallback path.

use firerange_common::Aabb;
use glam::Vec3;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::collections::BTreeMap;
use std::path::Path;

/// Content-addressed asset ID computed from the asset data.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct AssetId(pub u64);

/// A mesh on the CPU side: the merged primitives of one glTF document.
#[derive(Debug, Clone)]
pub struct CpuMesh {
    pub name: String,
    pub positions: Vec<[f32; 3]>,
    pub normals: Vec<[f32; 3]>,
    pub indices: Vec<u32>,
    pub base_color: [f32; 4],
    pub bounds: Aabb,
}

impl CpuMesh {
    pub fn vertex_count(&self) -> u32 {
        self.positions.len() as u32
    }

    pub fn index_count(&self) -> u32 {
        self.indices.len() as u32
    }

    /// Built-in unit cube for headless demos and tests.
    pub fn unit_cube(name: &str) -> Self {
        let p = 0.5_f32;
        #[rustfmt::skip]
        let positions = vec![
            // +Z face
            [-p, -p,  p], [ p, -p,  p], [ p,  p,  p], [-p,  p,  p],
            // -Z face
            [ p, -p, -p], [-p, -p, -p], [-p,  p, -p], [ p,  p, -p],
            // +X face
            [ p, -p,  p], [ p, -p, -p], [ p,  p, -p], [ p,  p,  p],
            // -X face
            [-p, -p, -p], [-p, -p,  p], [-p,  p,  p], [-p,  p, -p],
            // +Y face
            [-p,  p,  p], [ p,  p,  p], [ p,  p, -p], [-p,  p, -p],
            // -Y face
            [-p, -p, -p], [ p, -p, -p], [ p, -p,  p], [-p, -p,  p],
        ];
        let mut normals = Vec::with_capacity(24);
        for normal in [
            [0.0, 0.0, 1.0],
            [0.0, 0.0, -1.0],
            [1.0, 0.0, 0.0],
            [-1.0, 0.0, 0.0],
            [0.0, 1.0, 0.0],
            [0.0, -1.0, 0.0],
        ] {
            normals.extend(std::iter::repeat(normal).take(4));
        }
        #[rustfmt::skip]
        let indices: Vec<u32> = vec![
            0,1,2, 2,3,0,       // +Z
            4,5,6, 6,7,4,       // -Z
            8,9,10, 10,11,8,    // +X
            12,13,14, 14,15,12, // -X
            16,17,18, 18,19,16, // +Y
            20,21,22, 22,23,20, // -Y
        ];
        Self {
            name: name.into(),
            positions,
            normals,
            indices,
            base_color: [0.8, 0.8, 0.8, 1.0],
            bounds: Aabb::new(Vec3::splat(-p), Vec3::splat(p)),
        }
    }
}

/// Errors from asset operations.
#[derive(Debug, thiserror::Error)]
pub enum AssetError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("asset not found: {0:?}")]
    NotFound(AssetId),
    #[error("glTF import error: {0}")]
    Gltf(#[from] gltf::Error),
    #[error("mesh '{0}' has no POSITION data")]
    MissingPositions(String),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Summary of one registered mesh, for the inspection manifest.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MeshInfo {
    pub name: String,
    pub vertex_count: u32,
    pub index_count: u32,
    pub base_color: [f32; 4],
    pub bounds: Aabb,
}

/// Human-inspectable listing of everything in the store.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Manifest {
    pub meshes: Vec<MeshInfo>,
}

/// Content-addressed mesh registry.
///
/// Meshes are indexed by their content hash, so registering the same mesh
/// twice yields the same id and a single entry.
#[derive(Debug, Clone, Default)]
pub struct AssetStore {
    meshes: BTreeMap<AssetId, CpuMesh>,
}

impl AssetStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a mesh and return its asset ID.
    pub fn register_mesh(&mut self, mesh: CpuMesh) -> AssetId {
        let id = content_hash(&mesh.name, mesh.vertex_count(), mesh.index_count());
        tracing::debug!(
            name = %mesh.name,
            vertices = mesh.vertex_count(),
            indices = mesh.index_count(),
            "registered mesh"
        );
        self.meshes.insert(id, mesh);
        id
    }

    /// Get a mesh by ID.
    pub fn get_mesh(&self, id: AssetId) -> Option<&CpuMesh> {
        self.meshes.get(&id)
    }

    /// Get a mesh by ID, or an error suitable for `?` at setup time.
    pub fn mesh(&self, id: AssetId) -> Result<&CpuMesh, AssetError> {
        self.meshes.get(&id).ok_or(AssetError::NotFound(id))
    }

    /// Number of registered meshes.
    pub fn len(&self) -> usize {
        self.meshes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.meshes.is_empty()
    }

    /// Read-only access to all meshes in id order.
    pub fn meshes(&self) -> &BTreeMap<AssetId, CpuMesh> {
        &self.meshes
    }

    /// Import a glTF document (`.gltf` or `.glb`) and register its mesh.
    ///
    /// All primitives of the document are merged into one `CpuMesh`: indices
    /// are rebased onto the merged vertex list, bounds are the union of the
    /// primitive bounds, and the base color comes from the first material
    /// encountered. Exporters sometimes omit normals; those vertices get a
    /// flat up normal.
    pub fn import_gltf(&mut self, path: impl AsRef<Path>) -> Result<AssetId, AssetError> {
        let path = path.as_ref();
        let name = path
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or("mesh")
            .to_string();

        let (doc, buffers, _images) = gltf::import(path)?;

        let mut positions: Vec<[f32; 3]> = Vec::new();
        let mut normals: Vec<[f32; 3]> = Vec::new();
        let mut indices: Vec<u32> = Vec::new();
        let mut base_color = [0.8, 0.8, 0.8, 1.0];
        let mut color_set = false;
        let mut bounds: Option<Aabb> = None;

        for mesh in doc.meshes() {
            for prim in mesh.primitives() {
                let reader = prim.reader(|b| buffers.get(b.index()).map(|d| d.0.as_slice()));

                let base = positions.len() as u32;
                let Some(pos_iter) = reader.read_positions() else {
                    return Err(AssetError::MissingPositions(name));
                };
                positions.extend(pos_iter);
                let added = positions.len() - base as usize;

                match reader.read_normals() {
                    Some(iter) => normals.extend(iter),
                    None => normals.extend(std::iter::repeat([0.0, 1.0, 0.0]).take(added)),
                }

                match reader.read_indices() {
                    Some(read) => indices.extend(read.into_u32().map(|i| i + base)),
                    None => indices.extend(base..base + added as u32),
                }

                if !color_set {
                    base_color = prim.material().pbr_metallic_roughness().base_color_factor();
                    color_set = true;
                }

                let bb = prim.bounding_box();
                let prim_bounds = Aabb::new(Vec3::from(bb.min), Vec3::from(bb.max));
                bounds = Some(match bounds {
                    Some(b) => b.union(prim_bounds),
                    None => prim_bounds,
                });
            }
        }

        if positions.is_empty() {
            return Err(AssetError::MissingPositions(name));
        }

        tracing::info!(path = %path.display(), name = %name, "imported glTF mesh");

        Ok(self.register_mesh(CpuMesh {
            name,
            positions,
            normals,
            indices,
            base_color,
            bounds: bounds.unwrap_or(Aabb::ZERO),
        }))
    }

    /// Build the inspection manifest, in id order.
    pub fn manifest(&self) -> Manifest {
        Manifest {
            meshes: self
                .meshes
                .values()
                .map(|m| MeshInfo {
                    name: m.name.clone(),
                    vertex_count: m.vertex_count(),
                    index_count: m.index_count(),
                    base_color: m.base_color,
                    bounds: m.bounds,
                })
                .collect(),
        }
    }

    /// Write the manifest to a JSON file for inspection.
    pub fn save_manifest(&self, path: impl AsRef<Path>) -> Result<(), AssetError> {
        let file = std::fs::File::create(path)?;
        serde_json::to_writer_pretty(file, &self.manifest())?;
        Ok(())
    }
}

fn content_hash(name: &str, vertex_count: u32, index_count: u32) -> AssetId {
    let mut hasher = Sha256::new();
    hasher.update(name.as_bytes());
    hasher.update(vertex_count.to_le_bytes());
    hasher.update(index_count.to_le_bytes());
    let result = hasher.finalize();
    let mut bytes = [0u8; 8];
    bytes.copy_from_slice(&result[..8]);
    AssetId(u64::from_le_bytes(bytes))
}

pub fn crate_info() -> &'static str {
    "firerange-assets v0.1.0"
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unit_cube_shape() {
        let cube = CpuMesh::unit_cube("cube");
        assert_eq!(cube.vertex_count(), 24);
        assert_eq!(cube.index_count(), 36);
        assert_eq!(cube.positions.len(), cube.normals.len());
        assert!((cube.bounds.half_depth() - 0.5).abs() < 1e-6);
    }

    #[test]
    fn register_and_get() {
        let mut store = AssetStore::new();
        let id = store.register_mesh(CpuMesh::unit_cube("cube"));
        assert!(store.get_mesh(id).is_some());
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn content_addressed_dedup() {
        let mut store = AssetStore::new();
        let id1 = store.register_mesh(CpuMesh::unit_cube("cube"));
        let id2 = store.register_mesh(CpuMesh::unit_cube("cube"));
        assert_eq!(id1, id2);
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn different_names_hash_differently() {
        let mut store = AssetStore::new();
        let id1 = store.register_mesh(CpuMesh::unit_cube("target"));
        let id2 = store.register_mesh(CpuMesh::unit_cube("bullet"));
        assert_ne!(id1, id2);
        assert_eq!(store.len(), 2);
    }

    #[test]
    fn missing_mesh_is_an_error() {
        let store = AssetStore::new();
        let err = store.mesh(AssetId(42)).unwrap_err();
        assert!(matches!(err, AssetError::NotFound(AssetId(42))));
    }

    #[test]
    fn import_missing_file_fails() {
        let mut store = AssetStore::new();
        assert!(store.import_gltf("/no/such/model.glb").is_err());
        assert!(store.is_empty());
    }

    #[test]
    fn manifest_lists_registered_meshes() {
        let mut store = AssetStore::new();
        store.register_mesh(CpuMesh::unit_cube("target"));
        store.register_mesh(CpuMesh::unit_cube("blaster"));
        let manifest = store.manifest();
        assert_eq!(manifest.meshes.len(), 2);
        let names: Vec<&str> = manifest.meshes.iter().map(|m| m.name.as_str()).collect();
        assert!(names.contains(&"target"));
        assert!(names.contains(&"blaster"));
    }

    #[test]
    fn save_manifest_roundtrip() {
        let tmp = tempfile::NamedTempFile::new().unwrap();
        let mut store = AssetStore::new();
        store.register_mesh(CpuMesh::unit_cube("cube"));
        store.save_manifest(tmp.path()).unwrap();

        let text = std::fs::read_to_string(tmp.path()).unwrap();
        let loaded: Manifest = serde_json::from_str(&text).unwrap();
        assert_eq!(loaded.meshes.len(), 1);
        assert_eq!(loaded.meshes[0].vertex_count, 24);
    }
}
