use thiserror::Error;

use super::types::SearchResponse;

/// Search endpoint
const API_ENDPOINT: &str = "https://pixabay.com/api/";

/// Static access key. Pixabay hands these out per account and rate-limits
/// them; the key ships embedded because the app has no credential store.
const API_KEY: &str = "42198701-b9a5fa575f7b9ea832aebf9b8";

/// Results per page, fixed across every request
pub const PAGE_SIZE: u32 = 15;

/// Failure modes of a single search call.
///
/// Transport failures and non-success HTTP statuses are folded into one
/// variant on purpose: the user sees the same generic notification either
/// way, so the distinction would only ever reach a console line.
#[derive(Debug, Clone, Error)]
pub enum ApiError {
    /// Transport failure or a non-success HTTP status
    #[error("network error: {0}")]
    Network(String),
    /// The server answered with a success status but a zero-length body
    #[error("empty response from server")]
    EmptyResponse,
    /// The body was present but not the expected JSON
    #[error("malformed response: {0}")]
    Malformed(String),
}

impl From<reqwest::Error> for ApiError {
    fn from(err: reqwest::Error) -> Self {
        ApiError::Network(err.to_string())
    }
}

/// Thin client over the image-search API.
///
/// Cloning is cheap; the inner reqwest client is reference-counted and
/// shares its connection pool across clones.
#[derive(Debug, Clone)]
pub struct SearchClient {
    http: reqwest::Client,
}

impl SearchClient {
    pub fn new(http: reqwest::Client) -> Self {
        Self { http }
    }

    /// Fetch one page of results for `query`.
    ///
    /// A single attempt per call, no retries; the caller decides whether
    /// the error is worth surfacing. Callers guarantee a non-empty query
    /// and `page >= 1`; the query is trimmed here as a backstop.
    pub async fn search(&self, query: &str, page: u32) -> Result<SearchResponse, ApiError> {
        let response = self
            .http
            .get(API_ENDPOINT)
            .query(&search_params(query, page))
            .send()
            .await?
            .error_for_status()?;

        let body = response.bytes().await?;
        if body.is_empty() {
            return Err(ApiError::EmptyResponse);
        }

        serde_json::from_slice(&body).map_err(|e| ApiError::Malformed(e.to_string()))
    }
}

/// Fixed query parameters plus the caller's query and page.
fn search_params(query: &str, page: u32) -> Vec<(&'static str, String)> {
    vec![
        ("key", API_KEY.to_string()),
        ("q", query.trim().to_string()),
        ("image_type", "photo".to_string()),
        ("orientation", "horizontal".to_string()),
        ("safesearch", "true".to_string()),
        ("per_page", PAGE_SIZE.to_string()),
        ("page", page.to_string()),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    fn param<'a>(params: &'a [(&'static str, String)], name: &str) -> Option<&'a str> {
        params
            .iter()
            .find(|(key, _)| *key == name)
            .map(|(_, value)| value.as_str())
    }

    #[test]
    fn test_search_params_carry_fixed_filters() {
        let params = search_params("cats", 1);

        assert_eq!(param(&params, "image_type"), Some("photo"));
        assert_eq!(param(&params, "orientation"), Some("horizontal"));
        assert_eq!(param(&params, "safesearch"), Some("true"));
        assert_eq!(param(&params, "per_page"), Some("15"));
        assert!(param(&params, "key").is_some_and(|key| !key.is_empty()));
    }

    #[test]
    fn test_search_params_trim_query_and_pass_page() {
        let params = search_params("  mountain lake  ", 3);

        assert_eq!(param(&params, "q"), Some("mountain lake"));
        assert_eq!(param(&params, "page"), Some("3"));
    }

    #[test]
    fn test_api_error_messages_stay_generic() {
        // The notification text embeds Display output, so it must not leak
        // anything beyond a short description.
        assert_eq!(
            ApiError::EmptyResponse.to_string(),
            "empty response from server"
        );
        assert!(ApiError::Network("boom".into()).to_string().contains("boom"));
    }
}
