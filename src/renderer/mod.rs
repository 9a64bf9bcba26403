//! WebGPU rendering module
//!
//! Scenes are tessellated on the CPU into colored triangles in playfield
//! pixels, then mapped to clip space at upload time.

pub mod pipeline;
pub mod scene;
pub mod shapes;
pub mod vertex;

pub use pipeline::{RenderState, playfield_to_ndc};
pub use scene::build_frame_vertices;
pub use vertex::Vertex;
