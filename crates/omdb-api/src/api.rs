//! `OmdbApi` trait definition.
#![allow(clippy::future_not_send)]

use crate::error::OmdbError;
use crate::params::QueryData;
use crate::types::{OmdbDetails, OmdbSearchResponse};

/// OMDb API trait.
///
/// Abstracts API operations for mock substitution in tests.
/// Uses `trait_variant::make` to generate a `Send`-bound async trait.
#[allow(clippy::module_name_repetitions)]
#[trait_variant::make(OmdbApi: Send)]
pub trait LocalOmdbApi {
    /// Free-text search by `title`, filtered by `year`, `search_type`
    /// and `page`.
    ///
    /// # Errors
    ///
    /// Returns `OmdbError::InvalidCategory` for an unknown kind, and
    /// `Transport`, `Status`, `Decode` or `Application` if the request
    /// fails at the corresponding stage.
    async fn search(&self, params: &QueryData) -> Result<OmdbSearchResponse, OmdbError>;

    /// Looks up a single title by exact name.
    ///
    /// # Errors
    ///
    /// Same as [`LocalOmdbApi::search`].
    async fn lookup_by_title(&self, params: &QueryData) -> Result<OmdbDetails, OmdbError>;

    /// Looks up a single title by IMDb identifier (e.g. `tt2015381`).
    ///
    /// # Errors
    ///
    /// Returns `Transport`, `Status`, `Decode` or `Application` if the
    /// request fails at the corresponding stage.
    async fn lookup_by_imdb_id(&self, imdb_id: &str) -> Result<OmdbDetails, OmdbError>;
}
