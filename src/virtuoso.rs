use std::path::Path;
use std::time::Duration;

use regex::Regex;
use reqwest::blocking::{Client, RequestBuilder};
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, AUTHORIZATION, USER_AGENT, WWW_AUTHENTICATE};
use reqwest::{StatusCode, Url};
use serde_json::Value;
use tracing::debug;

use crate::config::Config;
use crate::digest::DigestAuth;
use crate::error::SalonError;
use crate::repository::{result_bindings, RdfRepository};

// Virtuoso's update endpoint is known to chew on large INSERT DATA
// payloads for a very long time before answering.
const UPDATE_TIMEOUT: Duration = Duration::from_secs(12_000);

/// Virtuoso adapter: digest-authenticated POSTs against a single SPARQL
/// endpoint URL, with the target graph passed as `default-graph-uri`.
/// Protocol details at http://www.w3.org/TR/sparql11-protocol/
pub struct VirtuosoRepository {
    client: Client,
    endpoint: String,
    database: String,
    auth: DigestAuth,
}

impl VirtuosoRepository {
    pub fn new(config: &Config) -> Result<Self, SalonError> {
        let mut headers = HeaderMap::new();
        headers.insert(
            USER_AGENT,
            HeaderValue::from_str(&format!("salon/{}", env!("CARGO_PKG_VERSION")))
                .map_err(|err| SalonError::StoreHttp(err.to_string()))?,
        );
        headers.insert(
            ACCEPT,
            HeaderValue::from_static(
                "application/sparql-results+json,application/json,text/javascript,application/javascript",
            ),
        );
        let client = Client::builder()
            .default_headers(headers)
            .timeout(None)
            .build()
            .map_err(|err| SalonError::StoreHttp(err.to_string()))?;
        Ok(Self {
            client,
            endpoint: config.endpoint.clone(),
            database: config.database.clone(),
            auth: DigestAuth::new(config.username.clone(), config.password.clone()),
        })
    }

    fn endpoint_url(&self, query: Option<&str>) -> Result<Url, SalonError> {
        let mut url =
            Url::parse(&self.endpoint).map_err(|err| SalonError::StoreHttp(err.to_string()))?;
        url.query_pairs_mut()
            .append_pair("default-graph-uri", &self.database);
        if let Some(query) = query {
            url.query_pairs_mut().append_pair("query", query);
        }
        Ok(url)
    }

    // One unauthenticated attempt; on a 401 the challenge is answered
    // and the request is sent once more.
    fn send_with_digest(
        &self,
        url: &Url,
        build: impl Fn() -> RequestBuilder,
    ) -> Result<reqwest::blocking::Response, SalonError> {
        let response = build()
            .send()
            .map_err(|err| SalonError::StoreHttp(err.to_string()))?;
        if response.status() != StatusCode::UNAUTHORIZED {
            return Self::handle_status(response);
        }

        let challenge = response
            .headers()
            .get(WWW_AUTHENTICATE)
            .and_then(|value| value.to_str().ok())
            .ok_or_else(|| {
                SalonError::DigestAuth("missing WWW-Authenticate challenge".to_string())
            })?
            .to_string();
        let request_uri = match url.query() {
            Some(query) => format!("{}?{}", url.path(), query),
            None => url.path().to_string(),
        };
        let authorization = self.auth.authorization("POST", &request_uri, &challenge)?;

        let response = build()
            .header(AUTHORIZATION, authorization)
            .send()
            .map_err(|err| SalonError::StoreHttp(err.to_string()))?;
        Self::handle_status(response)
    }

    fn handle_status(
        response: reqwest::blocking::Response,
    ) -> Result<reqwest::blocking::Response, SalonError> {
        if response.status().is_success() {
            return Ok(response);
        }
        let status = response.status().as_u16();
        let body = response
            .text()
            .unwrap_or_else(|_| "store request failed".to_string());
        Err(SalonError::RemoteQueryFailed { status, body })
    }
}

impl RdfRepository for VirtuosoRepository {
    fn query(&self, sparql: &str) -> Result<Vec<Value>, SalonError> {
        debug!(query = sparql, "running query");
        let url = self.endpoint_url(Some(sparql))?;
        let response = self.send_with_digest(&url, || self.client.post(url.clone()))?;
        let body: Value = response
            .json()
            .map_err(|err| SalonError::StoreHttp(err.to_string()))?;
        Ok(result_bindings(body))
    }

    fn update(&self, sparql: &str) -> Result<(), SalonError> {
        let sparql = strip_comment_lines(sparql);
        debug!(query = %sparql, "running update query");
        let url = self.endpoint_url(None)?;
        self.send_with_digest(&url, || {
            self.client
                .post(url.clone())
                .header("Content-Type", "application/sparql-update")
                .timeout(UPDATE_TIMEOUT)
                .body(sparql.clone())
        })?;
        Ok(())
    }

    fn initialize(&self, _seed: &Path) -> Result<(), SalonError> {
        Err(SalonError::UnsupportedOperation {
            backend: "virtuoso",
        })
    }

    fn format_insert(&self, ntriples: &str) -> String {
        format!("INSERT DATA {{ GRAPH <{}> {{ {ntriples} }} }}", self.database)
    }
}

/// Removes whole-line SPARQL comments; Virtuoso's update parser trips
/// over them when they arrive in a raw request body.
fn strip_comment_lines(query: &str) -> String {
    let comment_line = Regex::new(r"(?m)^[ \t]*#.*\n?").unwrap();
    comment_line.replace_all(query, "").into_owned()
}
