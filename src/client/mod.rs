//! HTTP client for the price prediction service.
//!
//! Two endpoints are consumed:
//! - `GET /get_location_names` returning `{ "locations": [...] }`
//! - `POST /predict_home_price` (multipart form) returning
//!   `{ "estimated_price": <number> }`

pub mod error;

use crate::app::state::FormInput;
use reqwest::multipart::Form;
use serde::Deserialize;
use std::time::Duration;
use tracing::debug;

pub use error::ClientError;

const LOCATIONS_PATH: &str = "get_location_names";
const PREDICT_PATH: &str = "predict_home_price";

#[derive(Debug, Deserialize)]
struct LocationsResponse {
    locations: Vec<String>,
}

#[derive(Debug, Deserialize)]
struct EstimateResponse {
    estimated_price: f64,
}

/// Cheap to clone; clones share the underlying connection pool.
#[derive(Debug, Clone)]
pub struct EstimationClient {
    http: reqwest::Client,
    base_url: reqwest::Url,
    timeout: Duration,
}

impl EstimationClient {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, ClientError> {
        // A trailing slash makes `Url::join` append rather than replace the
        // last path segment.
        let normalized = format!("{}/", base_url.trim_end_matches('/'));
        let base_url = reqwest::Url::parse(&normalized).map_err(|e| ClientError::InvalidBaseUrl {
            url: base_url.to_string(),
            reason: e.to_string(),
        })?;
        let http = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self {
            http,
            base_url,
            timeout,
        })
    }

    pub fn base_url(&self) -> &str {
        self.base_url.as_str()
    }

    fn endpoint(&self, path: &str) -> Result<reqwest::Url, ClientError> {
        self.base_url
            .join(path)
            .map_err(|e| ClientError::InvalidBaseUrl {
                url: self.base_url.to_string(),
                reason: e.to_string(),
            })
    }

    /// Fetch the list of known locations, in the order the service sends them.
    pub async fn fetch_locations(&self) -> Result<Vec<String>, ClientError> {
        let url = self.endpoint(LOCATIONS_PATH)?;
        debug!(%url, "fetching locations");
        let response = self
            .http
            .get(url)
            .send()
            .await
            .map_err(|e| self.classify(e))?;
        let body = self.read_body(response).await?;
        let parsed: LocationsResponse = serde_json::from_str(&body)?;
        Ok(parsed.locations)
    }

    /// Submit the form and return the predicted price in Lakh.
    ///
    /// Returns `Ok(None)` without touching the network when any field is
    /// empty.
    pub async fn fetch_estimate(&self, input: &FormInput) -> Result<Option<f64>, ClientError> {
        if !input.is_complete() {
            return Ok(None);
        }
        let url = self.endpoint(PREDICT_PATH)?;
        debug!(%url, ?input, "requesting estimate");
        let response = self
            .http
            .post(url)
            .multipart(build_form(input))
            .send()
            .await
            .map_err(|e| self.classify(e))?;
        let body = self.read_body(response).await?;
        let parsed: EstimateResponse = serde_json::from_str(&body)?;
        Ok(Some(parsed.estimated_price))
    }

    async fn read_body(&self, response: reqwest::Response) -> Result<String, ClientError> {
        let status = response.status();
        let body = response.text().await.map_err(|e| self.classify(e))?;
        if !status.is_success() {
            return Err(ClientError::Status {
                status: status.as_u16(),
                body,
            });
        }
        Ok(body)
    }

    fn classify(&self, err: reqwest::Error) -> ClientError {
        if err.is_timeout() {
            ClientError::Timeout(self.timeout)
        } else {
            ClientError::Http(err)
        }
    }
}

fn build_form(input: &FormInput) -> Form {
    input
        .wire_fields()
        .into_iter()
        .fold(Form::new(), |form, (name, value)| form.text(name, value.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;

    fn complete_input() -> FormInput {
        FormInput {
            total_sqft: "1200".into(),
            bhk: "2".into(),
            bath: "2".into(),
            location: "Indira Nagar".into(),
        }
    }

    /// Read one HTTP request: headers, then the body when a length is given
    /// or up to the closing multipart boundary otherwise.
    async fn read_request(stream: &mut tokio::net::TcpStream) -> String {
        let mut buf = Vec::new();
        let mut chunk = [0u8; 4096];
        loop {
            let n = stream.read(&mut chunk).await.unwrap_or(0);
            if n == 0 {
                break;
            }
            buf.extend_from_slice(&chunk[..n]);
            let text = String::from_utf8_lossy(&buf).to_string();
            let Some(header_end) = text.find("\r\n\r\n") else {
                continue;
            };
            let headers = text[..header_end].to_ascii_lowercase();
            let body_len = buf.len() - (header_end + 4);
            let content_length = headers
                .lines()
                .find_map(|l| l.strip_prefix("content-length:"))
                .and_then(|v| v.trim().parse::<usize>().ok());
            match content_length {
                Some(len) if body_len >= len => break,
                Some(_) => continue,
                None if headers.starts_with("get") => break,
                None if text.ends_with("--\r\n") => break,
                None => continue,
            }
        }
        String::from_utf8_lossy(&buf).to_string()
    }

    /// Serve a single canned response and hand back the raw request.
    async fn serve_once(status: &'static str, body: &'static str) -> (String, tokio::task::JoinHandle<String>) {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let handle = tokio::spawn(async move {
            let (mut stream, _) = listener.accept().await.unwrap();
            let request = read_request(&mut stream).await;
            let response = format!(
                "HTTP/1.1 {}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                status,
                body.len(),
                body
            );
            stream.write_all(response.as_bytes()).await.unwrap();
            stream.flush().await.unwrap();
            request
        });
        (format!("http://{}", addr), handle)
    }

    #[test]
    fn test_invalid_base_url_rejected() {
        let err = EstimationClient::new("not a url", Duration::from_secs(1)).unwrap_err();
        assert!(matches!(err, ClientError::InvalidBaseUrl { .. }));
    }

    #[test]
    fn test_endpoint_keeps_base_path() {
        let client = EstimationClient::new("http://host:5000/api/", Duration::from_secs(1)).unwrap();
        assert_eq!(
            client.endpoint(PREDICT_PATH).unwrap().as_str(),
            "http://host:5000/api/predict_home_price"
        );
        let client = EstimationClient::new("http://host:5000/api", Duration::from_secs(1)).unwrap();
        assert_eq!(
            client.endpoint(LOCATIONS_PATH).unwrap().as_str(),
            "http://host:5000/api/get_location_names"
        );
    }

    #[tokio::test]
    async fn test_fetch_locations_preserves_order() {
        let (url, server) =
            serve_once("200 OK", r#"{"locations":["whitefield","1st phase jp nagar","indira nagar"]}"#).await;
        let client = EstimationClient::new(&url, Duration::from_secs(5)).unwrap();

        let locations = client.fetch_locations().await.unwrap();
        assert_eq!(locations, vec!["whitefield", "1st phase jp nagar", "indira nagar"]);

        let request = server.await.unwrap();
        assert!(request.starts_with("GET /get_location_names "));
    }

    #[tokio::test]
    async fn test_fetch_estimate_posts_multipart_form() {
        let (url, server) = serve_once("200 OK", r#"{"estimated_price":83.87}"#).await;
        let client = EstimationClient::new(&url, Duration::from_secs(5)).unwrap();

        let price = client.fetch_estimate(&complete_input()).await.unwrap();
        assert_eq!(price, Some(83.87));

        let request = server.await.unwrap();
        assert!(request.starts_with("POST /predict_home_price "));
        assert!(request.to_ascii_lowercase().contains("content-type: multipart/form-data"));
        for field in ["total_sqft", "bhk", "bath", "location"] {
            assert!(request.contains(&format!("name=\"{}\"", field)), "missing {}", field);
        }
        assert!(request.contains("Indira Nagar"));
    }

    #[tokio::test]
    async fn test_incomplete_input_skips_network() {
        // Nothing listens on this address; a request would fail.
        let client = EstimationClient::new("http://127.0.0.1:9", Duration::from_secs(1)).unwrap();
        let mut input = complete_input();
        input.bath.clear();
        assert_eq!(client.fetch_estimate(&input).await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_non_success_status() {
        let (url, _server) = serve_once("500 Internal Server Error", r#"{"error":"boom"}"#).await;
        let client = EstimationClient::new(&url, Duration::from_secs(5)).unwrap();
        match client.fetch_locations().await {
            Err(ClientError::Status { status, body }) => {
                assert_eq!(status, 500);
                assert!(body.contains("boom"));
            }
            other => panic!("expected status error, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_malformed_body() {
        let (url, _server) = serve_once("200 OK", r#"{"price":1}"#).await;
        let client = EstimationClient::new(&url, Duration::from_secs(5)).unwrap();
        let err = client.fetch_estimate(&complete_input()).await.unwrap_err();
        assert!(matches!(err, ClientError::Decode(_)));
    }

    #[tokio::test]
    async fn test_timeout() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            let (_stream, _) = listener.accept().await.unwrap();
            tokio::time::sleep(Duration::from_secs(5)).await;
        });
        let client = EstimationClient::new(&format!("http://{}", addr), Duration::from_millis(200)).unwrap();
        let err = client.fetch_locations().await.unwrap_err();
        assert!(matches!(err, ClientError::Timeout(d) if d == Duration::from_millis(200)));
    }
}
