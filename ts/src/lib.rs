//! TripStore - typed record collections over a key-value store
//!
//! Persists a collection of JSON records under a single key of an opaque
//! string-to-string store. Every operation reads the whole collection,
//! modifies it, and writes it back.
//!
//! # Architecture
//!
//! ```text
//! {store_dir}/                       # one directory == one origin
//! └── my-local-explorer-itineraries.json   # JSON array of records
//! ```
//!
//! # Example
//!
//! ```ignore
//! use std::sync::Arc;
//! use tripstore::{Collection, FileKv};
//!
//! let kv = Arc::new(FileKv::open("~/.local/share/tripstore")?);
//! let trips: Collection<Itinerary> = Collection::new(kv, "my-local-explorer-itineraries");
//! trips.save(itinerary)?;
//! let all = trips.list();
//! ```

pub mod cli;
mod collection;
pub mod config;
mod kv;

pub use collection::{Collection, Record};
pub use kv::{FileKv, KeyValueStore, MemoryKv};

/// Directory name used under the platform data dir when none is configured
pub const DEFAULT_STORE_DIR_NAME: &str = "tripstore";

/// Default on-disk location of the store
pub fn default_store_path() -> std::path::PathBuf {
    dirs::data_local_dir()
        .unwrap_or_else(|| std::path::PathBuf::from("."))
        .join(DEFAULT_STORE_DIR_NAME)
}
