//! Scene state: entities, lights, and a camera that rides an entity.
//!
//! # Invariants
//! - All state mutations flow through explicit operations.
//! - Iteration order is deterministic (BTreeMap).
//! - The camera owns no world state; its pose derives from its parent entity
//!   at query time.

pub mod camera;
pub mod scene;

pub use camera::Camera;
pub use scene::{AmbientLight, DirectionalLight, EntityData, EntityKind, Scene};
