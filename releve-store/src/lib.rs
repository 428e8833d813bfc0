//! releve-store: the blob-store capability, canonical CSV codec,
//! merge/dedup writer, bucket layout, and the category resolver.

pub mod budget;
pub mod codec;
pub mod fs;
pub mod http;
pub mod layout;
pub mod memory;
pub mod merge;
pub mod object_store;

pub use fs::FsStore;
pub use http::HttpStore;
pub use layout::Env;
pub use memory::MemStore;
pub use merge::{MergeReport, append_rows};
pub use object_store::{ObjectStore, StoreError};
