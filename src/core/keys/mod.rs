//! Resource key management.
//!
//! - `derive`: content to lowerCamelCase key
//! - `registry`: batch allocation with reuse and collision suffixes
//! - `writer`: splicing new entries into the ARB file

pub mod derive;
pub mod registry;
pub mod writer;

pub use derive::derive_key;
pub use registry::{KeyRegistry, KeyResolution};
pub use writer::{PersistOutcome, persist_resource, render_resource};
