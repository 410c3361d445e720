use std::path::Path;

use serde_json::Value;

use crate::error::SalonError;

/// Capability set of a SPARQL triple store backend.
pub trait RdfRepository {
    /// Runs a SELECT query and returns the result binding rows.
    fn query(&self, sparql: &str) -> Result<Vec<Value>, SalonError>;

    /// Runs an update (INSERT/DELETE) query.
    fn update(&self, sparql: &str) -> Result<(), SalonError>;

    /// Bootstraps the database from a seed schema file.
    fn initialize(&self, seed: &Path) -> Result<(), SalonError>;

    /// Wraps an N-Triples payload in the INSERT DATA shape this backend
    /// expects for bulk loads.
    fn format_insert(&self, ntriples: &str) -> String;
}

/// Binding rows of a SPARQL JSON results document, empty when absent.
pub fn result_bindings(body: Value) -> Vec<Value> {
    body.get("results")
        .and_then(|results| results.get("bindings"))
        .and_then(|bindings| bindings.as_array())
        .cloned()
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn bindings_extracted_from_results_document() {
        let body = json!({
            "head": {"vars": ["ac"]},
            "results": {"bindings": [{"ac": {"type": "literal", "value": "1AAB"}}]}
        });
        let rows = result_bindings(body);
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0]["ac"]["value"], "1AAB");
    }

    #[test]
    fn missing_results_section_is_empty() {
        assert!(result_bindings(json!({})).is_empty());
        assert!(result_bindings(json!({"results": {}})).is_empty());
    }
}
