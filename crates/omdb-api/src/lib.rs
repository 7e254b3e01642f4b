//! Client library for the OMDb movie metadata API.
//!
//! Builds query URLs for search, title lookup and IMDb id lookup,
//! issues the GET request and decodes the JSON body into typed results.

mod api;
mod client;
mod error;
mod params;
mod request;
mod types;

#[allow(clippy::module_name_repetitions)]
pub use api::{LocalOmdbApi, OmdbApi};
#[allow(clippy::module_name_repetitions)]
pub use client::{OmdbClient, OmdbClientBuilder};
pub use error::{OmdbError, PartialResponse};
pub use params::{QueryData, SearchKind};
pub use request::{
    OmdbOperation, OmdbRequest, build_id_lookup_request, build_search_request,
    build_title_lookup_request,
};
pub use types::{OmdbDetails, OmdbRating, OmdbResponse, OmdbSearchResponse, OmdbSearchResult};
