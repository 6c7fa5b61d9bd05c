//! Player progress across levels
//!
//! - [`store`]: [`ProgressStore`], unlocks, best scores and stars
//! - [`backend`]: the key-value persistence contract and its two backends
//! - [`config`]: where the JSON progress file lives
//!
//! # Example
//!
//! ```
//! use crush_progress::{MemoryBackend, ProgressStore};
//!
//! let mut store = ProgressStore::with_standard_levels(MemoryBackend::new());
//! let result = store.complete_level(1, 850).unwrap();
//! assert_eq!(result.stars, 2);
//! assert!(result.unlocked_new_level);
//! assert_eq!(store.unlocked_count(), 2);
//! ```

pub mod backend;
pub mod config;
pub mod error;
pub mod store;

pub use backend::{JsonFileBackend, MemoryBackend, ProgressBackend, ProgressValue};
pub use config::StoreConfig;
pub use error::StoreError;
pub use store::{LevelCompletion, LevelProgress, ProgressStore};
