//! Crush (workspace facade crate).
//!
//! Re-exports the member crates as `crush::{types, core, engine, progress}` and
//! adds [`session`], which plays an engine headlessly and reports the result
//! to a progress store.

pub use crush_core as core;
pub use crush_engine as engine;
pub use crush_progress as progress;
pub use crush_types as types;

pub mod session;
