//! Shared types for the firerange workspace.
//!
//! # Invariants
//! - `EntityId` is `Ord` so BTreeMap-keyed state iterates deterministically.
//! - `Transform` composition follows scene-graph order: parent, then local.

pub mod types;

pub use types::{Aabb, EntityId, MeshHandle, Transform};
