use std::env;
use std::fmt;
use std::fs;
use std::path::PathBuf;
use std::str::FromStr;

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

use crate::error::SalonError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum StoreBackend {
    Stardog,
    Virtuoso,
}

impl fmt::Display for StoreBackend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StoreBackend::Stardog => write!(f, "stardog"),
            StoreBackend::Virtuoso => write!(f, "virtuoso"),
        }
    }
}

impl FromStr for StoreBackend {
    type Err = SalonError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_lowercase().as_str() {
            "stardog" => Ok(StoreBackend::Stardog),
            "virtuoso" => Ok(StoreBackend::Virtuoso),
            _ => Err(SalonError::InvalidBackend(value.to_string())),
        }
    }
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct ConfigFile {
    #[serde(default)]
    pub ontology_iri: Option<String>,
    #[serde(default)]
    pub ontology_namespace: Option<String>,
    #[serde(default)]
    pub backend: Option<StoreBackend>,
    #[serde(default)]
    pub endpoint: Option<String>,
    #[serde(default)]
    pub database: Option<String>,
    #[serde(default)]
    pub username: Option<String>,
    #[serde(default)]
    pub password: Option<String>,
}

#[derive(Debug, Clone)]
pub struct Config {
    pub ontology_iri: String,
    pub ontology_namespace: String,
    pub backend: StoreBackend,
    pub endpoint: String,
    pub database: String,
    pub username: String,
    pub password: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            ontology_iri: "http://www.ontologies.khaos.uma.es/salon/".to_string(),
            ontology_namespace: "salon".to_string(),
            backend: StoreBackend::Stardog,
            endpoint: "http://localhost:5820".to_string(),
            database: "SALON".to_string(),
            username: "admin".to_string(),
            password: "admin".to_string(),
        }
    }
}

impl Config {
    pub fn resolve(path: Option<&str>) -> Result<Config, SalonError> {
        let config_path = match path {
            Some(path) => PathBuf::from(path),
            None => PathBuf::from("salon.json"),
        };

        let file = if config_path.exists() {
            let content = fs::read_to_string(&config_path)
                .map_err(|_| SalonError::ConfigRead(config_path.clone()))?;
            serde_json::from_str(&content)
                .map_err(|err| SalonError::ConfigParse(err.to_string()))?
        } else if path.is_some() {
            return Err(SalonError::ConfigRead(config_path));
        } else {
            ConfigFile::default()
        };

        Self::resolve_from(file, |name| env::var(name).ok())
    }

    pub fn resolve_from(
        file: ConfigFile,
        env_var: impl Fn(&str) -> Option<String>,
    ) -> Result<Config, SalonError> {
        let defaults = Config::default();

        let backend = match env_var("SALON_BACKEND") {
            Some(value) => value.parse()?,
            None => file.backend.unwrap_or(defaults.backend),
        };

        let pick = |env_name: &str, file_value: Option<String>, default: String| {
            env_var(env_name).or(file_value).unwrap_or(default)
        };

        Ok(Config {
            ontology_iri: pick("SALON_ONTOLOGY_IRI", file.ontology_iri, defaults.ontology_iri),
            ontology_namespace: pick(
                "SALON_ONTOLOGY_NAMESPACE",
                file.ontology_namespace,
                defaults.ontology_namespace,
            ),
            backend,
            endpoint: pick("SALON_ENDPOINT", file.endpoint, defaults.endpoint),
            database: pick("SALON_DATABASE", file.database, defaults.database),
            username: pick("SALON_USERNAME", file.username, defaults.username),
            password: pick("SALON_PASSWORD", file.password, defaults.password),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_point_at_local_store() {
        let config = Config::resolve_from(ConfigFile::default(), |_| None).unwrap();
        assert_eq!(config.ontology_iri, "http://www.ontologies.khaos.uma.es/salon/");
        assert_eq!(config.ontology_namespace, "salon");
        assert_eq!(config.backend, StoreBackend::Stardog);
        assert_eq!(config.endpoint, "http://localhost:5820");
        assert_eq!(config.database, "SALON");
        assert_eq!(config.username, "admin");
        assert_eq!(config.password, "admin");
    }

    #[test]
    fn env_overrides_file() {
        let file = ConfigFile {
            endpoint: Some("http://stage:5820".to_string()),
            database: Some("ALIGNMENTS".to_string()),
            ..ConfigFile::default()
        };
        let config = Config::resolve_from(file, |name| match name {
            "SALON_ENDPOINT" => Some("http://prod:5820".to_string()),
            _ => None,
        })
        .unwrap();
        assert_eq!(config.endpoint, "http://prod:5820");
        assert_eq!(config.database, "ALIGNMENTS");
    }

    #[test]
    fn backend_from_env() {
        let config =
            Config::resolve_from(ConfigFile::default(), |name| match name {
                "SALON_BACKEND" => Some("virtuoso".to_string()),
                _ => None,
            })
            .unwrap();
        assert_eq!(config.backend, StoreBackend::Virtuoso);
    }

    #[test]
    fn invalid_backend_rejected() {
        let err = "jena".parse::<StoreBackend>().unwrap_err();
        assert!(matches!(err, SalonError::InvalidBackend(_)));
    }
}
