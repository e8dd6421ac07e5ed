pub mod cache;
pub mod local_store;

mod macros;

pub use cache::CacheEntry;
pub use cache::ResponseCache;
pub use local_store::LocalStore;
