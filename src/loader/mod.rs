//! Data and component loading.
//!
//! Both loaders sit on a [`Fetch`] implementation and keep a process-wide
//! cache keyed by logical name:
//!
//! ```text
//! DataLoader       data/{name}.json       ──► Arc<serde_json::Value>
//! ComponentLoader  components/{name}.html ──► Arc<str>
//! ```

pub mod component;
pub mod data;
pub mod fetch;

pub use component::{ComponentLoader, ComponentSlot};
pub use data::{CachePolicy, DataBundle, DataLoader};
pub use fetch::{Fetch, FetchError, FsFetcher};
