//! Support items for macro expansion. Not part of the stable API.

pub use alloc::sync::Arc;
