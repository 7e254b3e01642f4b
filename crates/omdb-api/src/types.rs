//! OMDb API response types.
//!
//! Every field is defaulted during decoding: when upstream reports
//! `"Response": "False"` only `Response` and `Error` are present.

use std::fmt;

use serde::Deserialize;

/// Wire value of the `Response` flag on failure.
const RESPONSE_FALSE: &str = "False";

/// Common accessors for decoded OMDb responses.
pub trait OmdbResponse {
    /// Returns `false` when upstream reported `"Response": "False"`.
    fn is_success(&self) -> bool;

    /// Upstream error text (empty on success).
    fn error_message(&self) -> &str;
}

// --- Search ---

/// Response from a search (`s=`) request.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct OmdbSearchResponse {
    /// Search results, in upstream order.
    #[serde(rename = "Search")]
    pub search: Vec<OmdbSearchResult>,
    /// Success flag (`"True"` / `"False"`).
    #[serde(rename = "Response")]
    pub response: String,
    /// Error message when `response` is `"False"`.
    #[serde(rename = "Error")]
    pub error: String,
    /// Total number of matches across all pages, string-encoded.
    #[serde(rename = "totalResults")]
    pub total_results: String,
}

impl OmdbSearchResponse {
    /// Parses `total_results` into a number.
    ///
    /// Returns `None` if the field is absent or not numeric.
    #[must_use]
    pub fn total_results_count(&self) -> Option<u32> {
        self.total_results.parse().ok()
    }
}

impl OmdbResponse for OmdbSearchResponse {
    fn is_success(&self) -> bool {
        self.response != RESPONSE_FALSE
    }

    fn error_message(&self) -> &str {
        &self.error
    }
}

/// A single search result.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct OmdbSearchResult {
    /// Title.
    #[serde(rename = "Title")]
    pub title: String,
    /// Year (a range such as `2008–2013` for series).
    #[serde(rename = "Year")]
    pub year: String,
    /// IMDb identifier.
    #[serde(rename = "imdbID")]
    pub imdb_id: String,
    /// Media category (`movie`, `series`, `episode`).
    #[serde(rename = "Type")]
    pub kind: String,
}

impl fmt::Display for OmdbSearchResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "#{}: {} ({}) Type: {}",
            self.imdb_id, self.title, self.year, self.kind
        )
    }
}

// --- Lookup ---

/// Response from a title (`t=`) or id (`i=`) lookup.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, rename_all = "PascalCase")]
pub struct OmdbDetails {
    /// Title.
    pub title: String,
    /// Year of release.
    pub year: String,
    /// Content rating (e.g. `PG-13`).
    pub rated: String,
    /// Release date.
    pub released: String,
    /// Runtime (e.g. `148 min`).
    pub runtime: String,
    /// Comma-separated genres.
    pub genre: String,
    /// Director(s).
    pub director: String,
    /// Writer(s).
    pub writer: String,
    /// Main cast.
    pub actors: String,
    /// Plot summary (full text).
    pub plot: String,
    /// Language(s).
    pub language: String,
    /// Country of origin.
    pub country: String,
    /// Awards summary.
    pub awards: String,
    /// Poster image URL.
    pub poster: String,
    /// Ratings from additional sources.
    pub ratings: Vec<OmdbRating>,
    /// Metacritic score.
    pub metascore: String,
    /// IMDb rating.
    #[serde(rename = "imdbRating")]
    pub imdb_rating: String,
    /// IMDb vote count.
    #[serde(rename = "imdbVotes")]
    pub imdb_votes: String,
    /// IMDb identifier.
    #[serde(rename = "imdbID")]
    pub imdb_id: String,
    /// Media category.
    #[serde(rename = "Type")]
    pub kind: String,
    /// DVD release date.
    #[serde(rename = "DVD")]
    pub dvd: String,
    /// Box office gross.
    pub box_office: String,
    /// Production company.
    pub production: String,
    /// Official website.
    pub website: String,
    /// Success flag (`"True"` / `"False"`).
    pub response: String,
    /// Error message when `response` is `"False"`.
    pub error: String,
}

impl OmdbResponse for OmdbDetails {
    fn is_success(&self) -> bool {
        self.response != RESPONSE_FALSE
    }

    fn error_message(&self) -> &str {
        &self.error
    }
}

impl fmt::Display for OmdbDetails {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}: {} ({})", self.imdb_id, self.title, self.year)
    }
}

/// Rating from a single source (e.g. Rotten Tomatoes).
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, rename_all = "PascalCase")]
pub struct OmdbRating {
    /// Source name.
    pub source: String,
    /// Rating value as displayed by the source (e.g. `87%`).
    pub value: String,
}
