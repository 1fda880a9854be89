//! WebGPU rendering module
//!
//! Snapshots become flat-colored triangles over a sky background.

pub mod pipeline;
pub mod shapes;
pub mod vertex;

pub use pipeline::{RenderState, RendererError};
pub use shapes::scene_vertices;
pub use vertex::Vertex;
