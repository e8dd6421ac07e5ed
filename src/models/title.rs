use serde::{Deserialize, Serialize};
use std::{fmt::Display, str::FromStr};

use crate::error::AppError;

/// Discriminator between a movie and a TV show
///
/// The same numeric id can denote a movie and, independently, a show, so a
/// title is only identified by the `(id, kind)` pair.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum MediaKind {
    #[serde(rename = "movie")]
    Movie,
    #[serde(rename = "tv", alias = "show")]
    Show,
}

impl MediaKind {
    /// Path segment used by TMDB for this kind
    pub fn path_segment(&self) -> &'static str {
        match self {
            MediaKind::Movie => "movie",
            MediaKind::Show => "tv",
        }
    }
}

impl Display for MediaKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.path_segment())
    }
}

impl FromStr for MediaKind {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "movie" => Ok(MediaKind::Movie),
            "tv" | "show" => Ok(MediaKind::Show),
            other => Err(AppError::InvalidInput(format!("Invalid media kind: {}", other))),
        }
    }
}

/// Listing requested by the browse views
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContentCategory {
    Trending,
    Movies,
    Shows,
}

impl FromStr for ContentCategory {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "trending" => Ok(ContentCategory::Trending),
            "movies" => Ok(ContentCategory::Movies),
            "shows" | "tv" => Ok(ContentCategory::Shows),
            _ => Err(AppError::InvalidInput("Invalid content type".to_string())),
        }
    }
}

/// A movie or TV show as shown in listings
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Title {
    pub id: u64,
    pub kind: MediaKind,
    pub display_name: String,
    pub release_year: Option<i32>,
    pub overview: String,
    pub genre_ids: Vec<u64>,
    pub rating_average: f64,
    pub poster_url: Option<String>,
    pub backdrop_url: Option<String>,
}

impl Title {
    pub fn is(&self, id: u64, kind: MediaKind) -> bool {
        self.id == id && self.kind == kind
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Genre {
    pub id: u64,
    pub name: String,
}

/// Genre lists for both kinds, as used by the genre filters
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct GenreCatalog {
    pub movie: Vec<Genre>,
    pub tv: Vec<Genre>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CastMember {
    pub id: u64,
    pub name: String,
    pub character: Option<String>,
    pub profile_url: Option<String>,
}

/// One rating from one source, kept in the source's own format
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Rating {
    pub source: String,
    pub value: String,
}

impl Rating {
    pub fn new(source: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            source: source.into(),
            value: value.into(),
        }
    }
}

/// Title merged from detail, credits and secondary-rating lookups
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DetailedTitle {
    #[serde(flatten)]
    pub title: Title,
    pub runtime_minutes: Option<u32>,
    pub genres: Vec<Genre>,
    pub cast: Vec<CastMember>,
    pub ratings: Vec<Rating>,
}
