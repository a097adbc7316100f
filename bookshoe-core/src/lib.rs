/// Bookshoe Core Library - Parametric book shoe geometry
///
/// This library provides the stateless core of the book shoe designer:
/// dimension records, the shoe mesh generator, settings import/export and
/// persistence, STL export, and the camera math used by previews.

pub mod designer;
pub mod dimensions;
pub mod face;
pub mod geometry;
pub mod projection;
pub mod settings;
pub mod shoe;
pub mod stl;
pub mod storage;
pub mod transform;

// Re-export commonly used types
pub use designer::Designer;
pub use dimensions::{Book, Margin, Offsets, Page, Walls};
pub use geometry::{Bounds, Mesh, Triangle};
pub use projection::Camera;
pub use settings::{Field, Settings, SettingsError};
pub use shoe::{generate, FaceGroup, Variant};
pub use stl::StlFormat;
pub use storage::{MemoryStore, SettingsStore, StorageError};
pub use transform::{RotationState, Transform};
