pub mod catalog;
pub mod client;
pub mod gateway;
pub mod providers;
pub mod recommendations;
pub mod request_queue;
pub mod watchlist;

pub use catalog::CatalogService;
pub use client::ApiClient;
pub use gateway::{Gateway, HttpGateway};
pub use recommendations::RecommendationService;
pub use request_queue::RequestQueue;
pub use watchlist::WatchlistService;
