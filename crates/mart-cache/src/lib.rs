//! Type-safe local Key-Value storage for the marketplace client.
//!
//! Models the client's local persistent key-value storage: a handful of
//! well-known keys, each holding one JSON document that is replaced whole on
//! every write. The backend is injected, so the same code runs against an
//! in-memory map in tests or a directory of files on the desktop.
//!
//! # Example
//!
//! ```rust
//! use mart_cache::{Cache, MemoryBackend};
//! use serde::{Deserialize, Serialize};
//!
//! #[derive(Serialize, Deserialize)]
//! struct Line {
//!     product_id: String,
//!     quantity: u32,
//! }
//!
//! let cache = Cache::new(MemoryBackend::new());
//!
//! cache.set("cart", &vec![Line { product_id: "p1".into(), quantity: 2 }]).unwrap();
//! let lines: Option<Vec<Line>> = cache.get("cart").unwrap();
//! assert_eq!(lines.unwrap()[0].quantity, 2);
//!
//! cache.delete("cart").unwrap();
//! ```

mod backend;
mod error;
mod kv;

pub use backend::{FileBackend, KvBackend, MemoryBackend};
pub use error::CacheError;
pub use kv::Cache;

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::{Cache, CacheError, FileBackend, KvBackend, MemoryBackend};
}
