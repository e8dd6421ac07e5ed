//! Upstream API endpoint builders
//!
//! TMDB provides the primary metadata (listings, details, credits, external
//! ids); OMDB provides secondary ratings looked up by IMDB id.

pub mod omdb;
pub mod tmdb;

pub use omdb::OmdbEndpoints;
pub use tmdb::TmdbEndpoints;
