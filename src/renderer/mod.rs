//! WebGPU rendering module
//!
//! Everything is drawn as vertex-colored triangles assembled on the CPU each
//! frame (`scene`), mapped to the canvas by `viewport`.

pub mod font;
pub mod pipeline;
pub mod scene;
pub mod shapes;
pub mod vertex;
pub mod viewport;

pub use pipeline::RenderState;
pub use vertex::Vertex;
pub use viewport::Viewport;
