//! Thin owning wrappers over raw GL objects. Every wrapper deletes its object
//! on drop, so they must be dropped while the context is still current.

pub mod framebuffer;
pub mod geometry;
pub mod program;
pub mod renderer;
pub mod shader;
pub mod texture;
