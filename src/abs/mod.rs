//! Thin owning wrappers around the window and the OpenGL objects the demo uses.
//!
//! Every wrapper keeps an `Arc<glow::Context>` and releases its object on drop.

pub mod app;
pub mod mesh;
pub mod shader;
pub mod texture;

pub use app::*;
pub use mesh::*;
pub use shader::*;
pub use texture::*;
