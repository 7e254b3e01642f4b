//! OMDb request parameter types.

use std::fmt;
use std::str::FromStr;

use crate::error::OmdbError;

/// Media category accepted by the `type` parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchKind {
    /// Feature film.
    Movie,
    /// Serialized show.
    Series,
    /// Single episode of a series.
    Episode,
}

impl SearchKind {
    /// Returns the wire value (`"movie"`, `"series"`, `"episode"`).
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Movie => "movie",
            Self::Series => "series",
            Self::Episode => "episode",
        }
    }
}

impl fmt::Display for SearchKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SearchKind {
    type Err = OmdbError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "movie" => Ok(Self::Movie),
            "series" => Ok(Self::Series),
            "episode" => Ok(Self::Episode),
            other => Err(OmdbError::InvalidCategory(String::from(other))),
        }
    }
}

/// Caller-supplied query for search and lookup operations.
///
/// No field is required at this layer. Search and title lookup read
/// `title`, `year`, `search_type` (and `page` for search); id lookup
/// reads only `imdb_id`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryData {
    /// Search term or exact title.
    pub title: Option<String>,
    /// Year of release.
    pub year: Option<String>,
    /// IMDb identifier (e.g. `tt2015381`).
    pub imdb_id: Option<String>,
    /// Raw media category, validated when the request is built.
    pub search_type: Option<String>,
    /// Result page for paginated searches.
    pub page: Option<String>,
}

impl QueryData {
    /// Creates an empty query.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a query for the given title or search term.
    pub fn title(title: impl Into<String>) -> Self {
        Self {
            title: Some(title.into()),
            ..Self::default()
        }
    }

    /// Creates a query for the given IMDb identifier.
    pub fn imdb_id(id: impl Into<String>) -> Self {
        Self {
            imdb_id: Some(id.into()),
            ..Self::default()
        }
    }

    /// Sets the year filter.
    #[must_use]
    pub fn year(mut self, year: impl Into<String>) -> Self {
        self.year = Some(year.into());
        self
    }

    /// Sets the raw media category. Unknown values are rejected
    /// with `OmdbError::InvalidCategory` before any request is sent.
    #[must_use]
    pub fn search_type(mut self, search_type: impl Into<String>) -> Self {
        self.search_type = Some(search_type.into());
        self
    }

    /// Sets the media category from a known kind.
    #[must_use]
    pub fn kind(self, kind: SearchKind) -> Self {
        self.search_type(kind.as_str())
    }

    /// Sets the result page.
    #[must_use]
    pub fn page(mut self, page: impl Into<String>) -> Self {
        self.page = Some(page.into());
        self
    }

    /// Validates `search_type`, returning the parsed kind.
    ///
    /// An absent or empty value is accepted and yields `None`.
    ///
    /// # Errors
    ///
    /// Returns `OmdbError::InvalidCategory` if the value is not one of
    /// `movie`, `series` or `episode`.
    pub fn validated_kind(&self) -> Result<Option<SearchKind>, OmdbError> {
        match self.search_type.as_deref() {
            None | Some("") => Ok(None),
            Some(raw) => raw.parse().map(Some),
        }
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use super::*;

    #[test]
    fn test_search_kind_parses_known_values() {
        // Arrange & Act & Assert
        assert_eq!("movie".parse::<SearchKind>().unwrap(), SearchKind::Movie);
        assert_eq!("series".parse::<SearchKind>().unwrap(), SearchKind::Series);
        assert_eq!(
            "episode".parse::<SearchKind>().unwrap(),
            SearchKind::Episode
        );
    }

    #[test]
    fn test_search_kind_rejects_unknown_value() {
        // Arrange & Act
        let result = "Movie".parse::<SearchKind>();

        // Assert
        assert!(matches!(result, Err(OmdbError::InvalidCategory(ref v)) if v == "Movie"));
    }

    #[test]
    fn test_query_builder_sets_fields() {
        // Arrange & Act
        let query = QueryData::title("Rush")
            .year("2013")
            .kind(SearchKind::Movie)
            .page("2");

        // Assert
        assert_eq!(query.title.as_deref(), Some("Rush"));
        assert_eq!(query.year.as_deref(), Some("2013"));
        assert_eq!(query.search_type.as_deref(), Some("movie"));
        assert_eq!(query.page.as_deref(), Some("2"));
        assert!(query.imdb_id.is_none());
    }

    #[test]
    fn test_validated_kind_accepts_empty() {
        // Arrange
        let unset = QueryData::title("Rush");
        let empty = QueryData::title("Rush").search_type("");

        // Act & Assert
        assert_eq!(unset.validated_kind().unwrap(), None);
        assert_eq!(empty.validated_kind().unwrap(), None);
    }

    #[test]
    fn test_validated_kind_rejects_game() {
        // Arrange
        let query = QueryData::title("Rush").search_type("game");

        // Act
        let result = query.validated_kind();

        // Assert
        assert!(matches!(result, Err(OmdbError::InvalidCategory(_))));
    }
}
