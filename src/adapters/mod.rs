// Adapters layer: concrete implementations of the domain ports.

pub mod http_fetcher;
pub mod json_store;
pub mod local_storage;
pub mod memory_store;

pub use http_fetcher::HttpSightFetcher;
pub use json_store::JsonFileSightStore;
pub use local_storage::LocalStorage;
pub use memory_store::InMemorySightStore;
