//! Request assembly: maps an operation and its parameters onto OMDb
//! query keys. Pure data shaping, no network access.

use std::fmt;

use url::Url;

use crate::error::OmdbError;
use crate::params::QueryData;

/// `plot` value sent on every lookup.
const PLOT: &str = "full";

/// `tomatoes` value sent on every lookup.
const TOMATOES: &str = "true";

/// The three OMDb operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OmdbOperation {
    /// Free-text search (`s=`).
    Search,
    /// Exact title lookup (`t=`).
    TitleLookup,
    /// IMDb identifier lookup (`i=`).
    IdLookup,
}

impl fmt::Display for OmdbOperation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Search => "search",
            Self::TitleLookup => "title lookup",
            Self::IdLookup => "id lookup",
        })
    }
}

/// Fully assembled request: operation tag plus ordered query pairs.
#[derive(Debug, Clone, PartialEq, Eq)]
#[allow(clippy::module_name_repetitions)]
pub struct OmdbRequest {
    /// Operation this request performs.
    pub operation: OmdbOperation,
    /// Query parameters, in wire order.
    pub query: Vec<(&'static str, String)>,
}

impl OmdbRequest {
    /// Renders the request against `base_url`, appending `apikey`
    /// when one is given.
    #[must_use]
    pub fn to_url(&self, base_url: &Url, api_key: Option<&str>) -> Url {
        let mut url = base_url.clone();
        {
            let mut pairs = url.query_pairs_mut();
            for (key, value) in &self.query {
                pairs.append_pair(key, value);
            }
            if let Some(key) = api_key {
                pairs.append_pair("apikey", key);
            }
        }
        url
    }
}

/// Pushes `key=value` when the value is present and non-empty.
fn push_optional(query: &mut Vec<(&'static str, String)>, key: &'static str, value: Option<&str>) {
    if let Some(v) = value.filter(|v| !v.is_empty()) {
        query.push((key, String::from(v)));
    }
}

/// Builds a search request (`s`, `y`, `type`, `page`).
///
/// Absent or empty `y`, `type` and `page` are left out of the query
/// rather than sent as empty keys; upstream treats both the same.
///
/// # Errors
///
/// Returns `OmdbError::InvalidCategory` if `search_type` is set to an
/// unknown kind.
pub fn build_search_request(params: &QueryData) -> Result<OmdbRequest, OmdbError> {
    let kind = params.validated_kind()?;

    let mut query = vec![("s", params.title.clone().unwrap_or_default())];
    push_optional(&mut query, "y", params.year.as_deref());
    push_optional(&mut query, "type", kind.map(|k| k.as_str()));
    push_optional(&mut query, "page", params.page.as_deref());

    Ok(OmdbRequest {
        operation: OmdbOperation::Search,
        query,
    })
}

/// Builds a title lookup request (`t`, `y`, `type`, `plot`, `tomatoes`).
///
/// # Errors
///
/// Returns `OmdbError::InvalidCategory` if `search_type` is set to an
/// unknown kind.
pub fn build_title_lookup_request(params: &QueryData) -> Result<OmdbRequest, OmdbError> {
    let kind = params.validated_kind()?;

    let mut query = vec![("t", params.title.clone().unwrap_or_default())];
    push_optional(&mut query, "y", params.year.as_deref());
    push_optional(&mut query, "type", kind.map(|k| k.as_str()));
    query.push(("plot", String::from(PLOT)));
    query.push(("tomatoes", String::from(TOMATOES)));

    Ok(OmdbRequest {
        operation: OmdbOperation::TitleLookup,
        query,
    })
}

/// Builds an IMDb id lookup request (`i`, `plot`, `tomatoes`).
#[must_use]
pub fn build_id_lookup_request(imdb_id: &str) -> OmdbRequest {
    OmdbRequest {
        operation: OmdbOperation::IdLookup,
        query: vec![
            ("i", String::from(imdb_id)),
            ("plot", String::from(PLOT)),
            ("tomatoes", String::from(TOMATOES)),
        ],
    }
}
