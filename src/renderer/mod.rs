//! WebGPU render bridge
//!
//! The simulation never calls into this module; `main.rs` hands it entity
//! positions once per tick and it produces a frame.

pub mod pipeline;
pub mod shapes;
pub mod vertex;

pub use pipeline::RenderState;
pub use shapes::build_scene;
pub use vertex::Vertex;
