//! `OmdbError` - failures of the request pipeline.

use crate::types::{OmdbDetails, OmdbSearchResponse};

/// Decoded body that accompanies an application-level failure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PartialResponse {
    /// Partially populated search response.
    Search(OmdbSearchResponse),
    /// Partially populated lookup response.
    Details(OmdbDetails),
}

impl From<OmdbSearchResponse> for PartialResponse {
    fn from(response: OmdbSearchResponse) -> Self {
        Self::Search(response)
    }
}

impl From<OmdbDetails> for PartialResponse {
    fn from(details: OmdbDetails) -> Self {
        Self::Details(details)
    }
}

/// Error returned by OMDb API operations.
///
/// Each variant is terminal. Nothing is retried.
#[derive(Debug, thiserror::Error)]
#[allow(clippy::module_name_repetitions)]
pub enum OmdbError {
    /// Search kind is not `movie`, `series` or `episode`. Raised before
    /// any request is sent.
    #[error("invalid search category: {0}")]
    InvalidCategory(String),

    /// Connection, DNS, timeout or body read failure.
    #[error("OMDb request failed: {0}")]
    Transport(#[from] reqwest::Error),

    /// Upstream answered with a status other than 200.
    #[error("status code {0} received from OMDb")]
    Status(u16),

    /// Body is not valid JSON for the expected shape.
    #[error("failed to decode OMDb JSON response: {0}")]
    Decode(#[from] serde_json::Error),

    /// Well-formed response with `"Response": "False"`.
    ///
    /// `partial` holds the decoded body so callers can inspect
    /// whatever fields upstream did send.
    #[error("{message}")]
    Application {
        /// Upstream `Error` text.
        message: String,
        /// Decoded body.
        partial: Box<PartialResponse>,
    },
}

impl OmdbError {
    /// Returns the decoded search response of an application failure.
    #[must_use]
    pub fn partial_search(&self) -> Option<&OmdbSearchResponse> {
        match self {
            Self::Application { partial, .. } => match partial.as_ref() {
                PartialResponse::Search(response) => Some(response),
                PartialResponse::Details(_) => None,
            },
            _ => None,
        }
    }

    /// Returns the decoded lookup response of an application failure.
    #[must_use]
    pub fn partial_details(&self) -> Option<&OmdbDetails> {
        match self {
            Self::Application { partial, .. } => match partial.as_ref() {
                PartialResponse::Details(details) => Some(details),
                PartialResponse::Search(_) => None,
            },
            _ => None,
        }
    }

    /// Returns the HTTP status code of a `Status` failure.
    #[must_use]
    pub const fn status(&self) -> Option<u16> {
        match self {
            Self::Status(code) => Some(*code),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use super::*;

    #[test]
    fn test_application_error_displays_upstream_message() {
        // Arrange
        let err = OmdbError::Application {
            message: String::from("Movie not found!"),
            partial: Box::new(OmdbDetails::default().into()),
        };

        // Act & Assert
        assert_eq!(err.to_string(), "Movie not found!");
        assert!(err.partial_details().is_some());
        assert!(err.partial_search().is_none());
    }

    #[test]
    fn test_status_error_message() {
        // Arrange
        let err = OmdbError::Status(404);

        // Act & Assert
        assert_eq!(err.to_string(), "status code 404 received from OMDb");
        assert_eq!(err.status(), Some(404));
    }

    #[test]
    fn test_decode_error_has_no_partial() {
        // Arrange
        let source = serde_json::from_str::<OmdbDetails>("{").unwrap_err();
        let err = OmdbError::from(source);

        // Act & Assert
        assert!(matches!(err, OmdbError::Decode(_)));
        assert!(err.partial_details().is_none());
        assert_eq!(err.status(), None);
    }
}
