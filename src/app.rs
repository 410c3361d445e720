use std::path::Path;

use oxrdf::Graph;
use tracing::{info, warn};

use crate::config::Config;
use crate::error::SalonError;
use crate::export;
use crate::fasta::{self, SequenceKind};
use crate::macsim;
use crate::ontology::Ontology;
use crate::query;
use crate::rdfio;
use crate::repository::RdfRepository;

/// Wires the configuration, the ontology binder and a store backend
/// into the five CLI operations.
pub struct App<R> {
    ontology: Ontology,
    repository: R,
}

impl<R: RdfRepository> App<R> {
    pub fn new(config: &Config, repository: R) -> Self {
        Self {
            ontology: Ontology::new(config),
            repository,
        }
    }

    pub fn init(&self, seed: &Path) -> Result<(), SalonError> {
        self.repository.initialize(seed)
    }

    pub fn load(&self, filename: &Path) -> Result<(), SalonError> {
        let graph = rdfio::read_graph(filename)?;
        info!(
            triples = graph.len(),
            file = %filename.display(),
            "loading graph into store"
        );
        let insert = self.repository.format_insert(&graph.to_string());
        self.repository.update(&insert)
    }

    /// Two-phase enrichment: an accession lookup, then a federated
    /// INSERT against UniProt. A sequence without an accession is not
    /// an error; the command logs a diagnostic and stops there.
    pub fn enrich(&self, uri: &str) -> Result<(), SalonError> {
        let lookup = query::accession_lookup(&self.ontology, uri);
        let bindings = self.repository.query(&lookup)?;
        let accession = bindings
            .first()
            .map(|row| export::binding_value(row, "ac").to_string())
            .unwrap_or_default();
        if accession.is_empty() {
            warn!(uri, "accession number not found for sequence");
            return Ok(());
        }

        let insert = query::enrichment_insert(&self.ontology, uri, &accession);
        self.repository.update(&insert)
    }

    pub fn export(&self, uri: &str) -> Result<Vec<String>, SalonError> {
        let select = query::export_select(&self.ontology, uri);
        let bindings = self.repository.query(&select)?;
        export::description_lines(&bindings)
    }

    pub fn parse(
        &self,
        input: &Path,
        output: &Path,
        kind: SequenceKind,
    ) -> Result<(), SalonError> {
        let graph = self.translate(input, kind)?;
        rdfio::write_graph(&graph, output, &self.ontology)?;
        info!(
            triples = graph.len(),
            output = %output.display(),
            "wrote translated graph"
        );
        Ok(())
    }

    pub fn translate(&self, input: &Path, kind: SequenceKind) -> Result<Graph, SalonError> {
        let extension = input
            .extension()
            .and_then(|extension| extension.to_str())
            .map(str::to_lowercase)
            .unwrap_or_default();
        match extension.as_str() {
            "xml" => macsim::from_macsim_xml(input, &self.ontology),
            "fa" | "fasta" => fasta::from_fasta(input, &self.ontology, kind),
            _ => Err(SalonError::UnsupportedInput(input.display().to_string())),
        }
    }
}
