//! Store Adapters

mod http_collection_store;

pub use http_collection_store::{HttpCollectionStore, HttpCollectionStoreConfig};
