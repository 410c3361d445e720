use std::path::Path;

use reqwest::blocking::multipart::{Form, Part};
use reqwest::blocking::Client;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, USER_AGENT};
use serde_json::{json, Value};
use tracing::{debug, info};

use crate::config::Config;
use crate::error::SalonError;
use crate::repository::{result_bindings, RdfRepository};

/// Stardog adapter speaking the standard SPARQL protocol against
/// `{endpoint}/{database}/query|update` with basic credentials.
pub struct StardogRepository {
    client: Client,
    endpoint: String,
    database: String,
    username: String,
    password: String,
}

impl StardogRepository {
    pub fn new(config: &Config) -> Result<Self, SalonError> {
        let mut headers = HeaderMap::new();
        headers.insert(
            USER_AGENT,
            HeaderValue::from_str(&format!("salon/{}", env!("CARGO_PKG_VERSION")))
                .map_err(|err| SalonError::StoreHttp(err.to_string()))?,
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
            username: config.username.clone(),
            password: config.password.clone(),
        })
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

impl RdfRepository for StardogRepository {
    fn query(&self, sparql: &str) -> Result<Vec<Value>, SalonError> {
        debug!(query = sparql, "running query");
        let url = format!("{}/{}/query", self.endpoint, self.database);
        let response = self
            .client
            .get(&url)
            .basic_auth(&self.username, Some(&self.password))
            .header(ACCEPT, "application/sparql-results+json")
            .query(&[("query", sparql)])
            .send()
            .map_err(|err| SalonError::StoreHttp(err.to_string()))?;
        let response = Self::handle_status(response)?;
        let body: Value = response
            .json()
            .map_err(|err| SalonError::StoreHttp(err.to_string()))?;
        Ok(result_bindings(body))
    }

    fn update(&self, sparql: &str) -> Result<(), SalonError> {
        debug!(query = sparql, "running update query");
        let url = format!("{}/{}/update", self.endpoint, self.database);
        let response = self
            .client
            .post(&url)
            .basic_auth(&self.username, Some(&self.password))
            .form(&[("update", sparql)])
            .send()
            .map_err(|err| SalonError::StoreHttp(err.to_string()))?;
        Self::handle_status(response)?;
        Ok(())
    }

    fn initialize(&self, seed: &Path) -> Result<(), SalonError> {
        let filename = seed
            .file_name()
            .and_then(|name| name.to_str())
            .ok_or_else(|| SalonError::FileRead {
                path: seed.to_path_buf(),
                message: "missing file name".to_string(),
            })?
            .to_string();

        let meta = json!({
            "dbname": self.database,
            "options": {"search.enabled": "true"},
            "files": [{"filename": filename}],
        });

        let meta_part = Part::text(meta.to_string())
            .mime_str("application/json")
            .map_err(|err| SalonError::StoreHttp(err.to_string()))?;
        let file_part = Part::file(seed)
            .map_err(|err| SalonError::FileRead {
                path: seed.to_path_buf(),
                message: err.to_string(),
            })?
            .mime_str("application/rdf+xml")
            .map_err(|err| SalonError::StoreHttp(err.to_string()))?;
        let form = Form::new()
            .part("root", meta_part)
            .part(filename, file_part);

        let url = format!("{}/admin/databases", self.endpoint);
        let response = self
            .client
            .post(&url)
            .basic_auth(&self.username, Some(&self.password))
            .multipart(form)
            .send()
            .map_err(|err| SalonError::StoreHttp(err.to_string()))?;
        let response = Self::handle_status(response)?;
        info!(
            database = self.database,
            status = response.status().as_u16(),
            "database created"
        );
        Ok(())
    }

    fn format_insert(&self, ntriples: &str) -> String {
        format!("INSERT DATA {{ {ntriples} }}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn insert_payload_has_no_graph_clause() {
        let repository = StardogRepository::new(&Config::default()).unwrap();
        let query =
            repository.format_insert("<http://a> <http://b> \"c\" .");
        assert_eq!(query, "INSERT DATA { <http://a> <http://b> \"c\" . }");
    }
}
