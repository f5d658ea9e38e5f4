//! Actions for processing findings.
//!
//! Actions convert Issues into Operations and execute them.
//!
//! ```text
//! Issue (problem detected)
//!     ↓
//! Action (Issue → Operation conversion)
//!     ↓
//! Operation (text edit anchored to a source line)
//!     ↓
//! execute (file modification through an EditSet)
//! ```
//!
//! - [`InsertDisableComment`]: Insert `arblift-disable-next-line` comments (baseline)

mod insert_disable_comment;
mod operation;
mod traits;

pub use insert_disable_comment::InsertDisableComment;
pub use operation::Operation;
pub use traits::{Action, ActionStats, execute_operations};
