//! Rendering module
//!
//! `projector` turns a session into draw commands, `shapes` tessellates them
//! into triangles and `pipeline` paints those with WebGPU.

pub mod pipeline;
pub mod projector;
pub mod shapes;
pub mod vertex;

pub use pipeline::{RenderError, RenderState};
pub use projector::{DrawCommand, cleared, project};
pub use shapes::tessellate;
