//! In-memory document tree and host double.
//!
//! [`DomTree`] is a small arena-backed element tree with parent links,
//! markers, and link targets — enough structure for the inspector and the
//! formatting simulation. [`MemoryHost`] wraps it with a recorded
//! selection, a command log, and a recorded toolbar surface, implementing
//! every [`crate::host`] trait. Tests and the demo binary run the full
//! controller against it; a browser embedding supplies its own
//! implementations instead.

mod memory;
mod tree;

pub use memory::{MemoryHost, SurfaceState};
pub use tree::DomTree;
