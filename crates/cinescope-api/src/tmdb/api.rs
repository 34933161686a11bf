use reqwest::{Client, Url};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use std::time::Duration;
use tracing::{debug, warn};
use crate::error::ApiError;

/// Error payload the provider sends alongside non-2xx statuses
#[derive(Debug, Deserialize)]
struct ErrorBody {
    status_message: Option<String>,
}

/// Create the shared HTTP client. The same timeout bounds connecting and the whole call.
pub fn create_http_client(timeout: Duration) -> Result<Client, ApiError> {
    let client = Client::builder()
        .user_agent(concat!("cinescope/", env!("CARGO_PKG_VERSION")))
        .connect_timeout(timeout)
        .timeout(timeout)
        .build()?;
    Ok(client)
}

/// Parse the configured base URL, making sure relative joins keep its path
pub fn parse_base_url(base_url: &str) -> Result<Url, ApiError> {
    let mut normalized = base_url.trim().to_string();
    if !normalized.ends_with('/') {
        normalized.push('/');
    }
    Url::parse(&normalized).map_err(|e| ApiError::InvalidUrl(format!("{}: {}", base_url, e)))
}

/// Build an endpoint URL. `api_key` and `language` are attached to every request.
pub fn build_url(
    base_url: &Url,
    path: &str,
    api_key: &str,
    language: &str,
    params: &[(&str, String)],
) -> Result<Url, ApiError> {
    let mut url = base_url
        .join(path.trim_start_matches('/'))
        .map_err(|e| ApiError::InvalidUrl(format!("{}: {}", path, e)))?;
    {
        let mut query = url.query_pairs_mut();
        query.append_pair("api_key", api_key);
        query.append_pair("language", language);
        for (name, value) in params {
            query.append_pair(name, value);
        }
    }
    Ok(url)
}

/// Issue a GET and decode the JSON body
pub async fn get_json<T: DeserializeOwned>(
    client: &Client,
    url: Url,
    endpoint: &str,
) -> Result<T, ApiError> {
    debug!(endpoint = endpoint, "GET catalog endpoint");

    let response = client.get(url).header("Accept", "application/json").send().await?;

    let status = response.status();
    if !status.is_success() {
        let body = response.text().await.unwrap_or_default();
        let message = serde_json::from_str::<ErrorBody>(&body)
            .ok()
            .and_then(|b| b.status_message)
            .unwrap_or(body);
        warn!(endpoint = endpoint, status = status.as_u16(), "Catalog request failed: {}", message);
        return Err(ApiError::Status {
            status: status.as_u16(),
            message,
        });
    }

    let bytes = response.bytes().await?;
    serde_json::from_slice(&bytes).map_err(|source| ApiError::Decode {
        endpoint: endpoint.to_string(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_url_keeps_base_path_and_appends_params() {
        let base = parse_base_url("https://api.themoviedb.org/3").unwrap();
        let url = build_url(&base, "movie/popular", "KEY", "en-US", &[("page", "2".to_string())]).unwrap();
        assert_eq!(
            url.as_str(),
            "https://api.themoviedb.org/3/movie/popular?api_key=KEY&language=en-US&page=2"
        );
    }

    #[test]
    fn test_build_url_encodes_query() {
        let base = parse_base_url("https://api.themoviedb.org/3/").unwrap();
        let url = build_url(
            &base,
            "/search/multi",
            "KEY",
            "en-US",
            &[("query", "fast & furious".to_string()), ("page", "1".to_string())],
        )
        .unwrap();
        assert_eq!(url.path(), "/3/search/multi");
        let pairs: Vec<(String, String)> = url.query_pairs().into_owned().collect();
        assert!(pairs.contains(&("query".to_string(), "fast & furious".to_string())));
    }

    #[test]
    fn test_parse_base_url_rejects_garbage() {
        assert!(matches!(parse_base_url("not a url"), Err(ApiError::InvalidUrl(_))));
    }
}
