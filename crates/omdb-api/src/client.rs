//! `OmdbClient` - OMDb API client implementation.

use anyhow::{Context, Result};
use reqwest::{Client, StatusCode};
use serde::de::{DeserializeOwned, Error as _};
use serde_json::Value;
use tracing::instrument;
use url::Url;

use crate::api::LocalOmdbApi;
use crate::error::{OmdbError, PartialResponse};
use crate::params::QueryData;
use crate::request::{
    OmdbRequest, build_id_lookup_request, build_search_request, build_title_lookup_request,
};
use crate::types::{OmdbDetails, OmdbResponse, OmdbSearchResponse};

/// Default base URL for the OMDb API.
const DEFAULT_BASE_URL: &str = "http://www.omdbapi.com/";

/// OMDb API client.
///
/// Holds no per-call state; concurrent calls are independent.
#[derive(Debug)]
#[allow(clippy::module_name_repetitions)]
pub struct OmdbClient {
    /// HTTP client.
    http_client: Client,
    /// Base URL for API requests.
    base_url: Url,
    /// API key, sent as `apikey` when set.
    api_key: Option<String>,
}

/// Builder for `OmdbClient`.
#[derive(Debug)]
#[allow(clippy::module_name_repetitions)]
pub struct OmdbClientBuilder {
    base_url: Option<Url>,
    api_key: Option<String>,
    user_agent: Option<String>,
}

impl OmdbClientBuilder {
    /// Creates a new builder.
    const fn new() -> Self {
        Self {
            base_url: None,
            api_key: None,
            user_agent: None,
        }
    }

    /// Overrides the base URL (for wiremock in tests).
    #[must_use]
    pub fn base_url(mut self, url: Url) -> Self {
        self.base_url = Some(url);
        self
    }

    /// Sets the API key.
    #[must_use]
    pub fn api_key(mut self, key: impl Into<String>) -> Self {
        self.api_key = Some(key.into());
        self
    }

    /// Sets the User-Agent (required).
    #[must_use]
    pub fn user_agent(mut self, ua: impl Into<String>) -> Self {
        self.user_agent = Some(ua.into());
        self
    }

    /// Builds the client.
    ///
    /// # Errors
    ///
    /// - `user_agent` is not set.
    /// - `reqwest::Client` build fails.
    pub fn build(self) -> Result<OmdbClient> {
        let user_agent = self.user_agent.context("user_agent is required")?;

        let base_url = if let Some(url) = self.base_url {
            url
        } else {
            let result = Url::parse(DEFAULT_BASE_URL);
            result.context("invalid default base URL")?
        };

        let http_client = Client::builder()
            .user_agent(&user_agent)
            .gzip(true)
            .build()
            .context("failed to build HTTP client")?;

        Ok(OmdbClient {
            http_client,
            base_url,
            api_key: self.api_key.filter(|k| !k.is_empty()),
        })
    }
}

/// Response keys whose arrays hold objects (`Search` items, `Ratings`).
const OBJECT_ARRAY_KEYS: &[&str] = &["Search", "Ratings"];

/// Rejects bodies that are not JSON objects.
///
/// The response structs default every field, so serde would otherwise
/// accept an array as positional fields.
fn ensure_object_shape(value: &Value) -> Result<(), serde_json::Error> {
    let Some(object) = value.as_object() else {
        return Err(serde_json::Error::custom(format!(
            "expected a JSON object, found {value}"
        )));
    };
    for key in OBJECT_ARRAY_KEYS {
        if let Some(Value::Array(items)) = object.get(*key)
            && items.iter().any(|item| !item.is_object())
        {
            return Err(serde_json::Error::custom(format!(
                "expected objects in `{key}` array"
            )));
        }
    }
    Ok(())
}

/// Decodes a response body and applies the `Response` flag.
///
/// On `"Response": "False"` the decoded body travels inside
/// `OmdbError::Application`.
fn decode_body<T>(body: &str) -> Result<T, OmdbError>
where
    T: DeserializeOwned + OmdbResponse + Into<PartialResponse>,
{
    let value: Value = serde_json::from_str(body)?;
    ensure_object_shape(&value)?;
    let decoded: T = serde_json::from_value(value)?;
    if decoded.is_success() {
        return Ok(decoded);
    }

    let message = String::from(decoded.error_message());
    tracing::warn!(error = %message, "OMDb API reported failure");
    Err(OmdbError::Application {
        message,
        partial: Box::new(decoded.into()),
    })
}

impl OmdbClient {
    /// Creates a new builder.
    #[must_use]
    pub const fn builder() -> OmdbClientBuilder {
        OmdbClientBuilder::new()
    }

    /// Sends a GET request, checks the status code and decodes the body.
    #[instrument(skip_all, fields(operation = %request.operation))]
    async fn get_json<T>(&self, request: &OmdbRequest) -> Result<T, OmdbError>
    where
        T: DeserializeOwned + OmdbResponse + Into<PartialResponse>,
    {
        tracing::debug!(
            url = %request.to_url(&self.base_url, None),
            "OMDb API request"
        );
        let url = request.to_url(&self.base_url, self.api_key.as_deref());

        let response = self.http_client.get(url).send().await?;

        let status = response.status();
        if status != StatusCode::OK {
            tracing::debug!(%status, "OMDb API returned non-OK status");
            return Err(OmdbError::Status(status.as_u16()));
        }

        let body = response.text().await?;
        tracing::debug!(body_len = body.len(), "OMDb API response received");

        decode_body(&body)
    }
}

impl LocalOmdbApi for OmdbClient {
    #[instrument(skip_all)]
    async fn search(&self, params: &QueryData) -> Result<OmdbSearchResponse, OmdbError> {
        let request = build_search_request(params)?;
        self.get_json(&request).await
    }

    #[instrument(skip_all)]
    async fn lookup_by_title(&self, params: &QueryData) -> Result<OmdbDetails, OmdbError> {
        let request = build_title_lookup_request(params)?;
        self.get_json(&request).await
    }

    #[instrument(skip_all)]
    async fn lookup_by_imdb_id(&self, imdb_id: &str) -> Result<OmdbDetails, OmdbError> {
        let request = build_id_lookup_request(imdb_id);
        self.get_json(&request).await
    }
}
