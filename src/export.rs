use std::fmt;

use serde_json::Value;

use crate::error::SalonError;

/// Protein existence evidence levels, mapped from the UniProt core
/// controlled vocabulary to the `PE=` rank of a description line.
pub const EXISTENCE_LEVELS: [(&str, u8); 5] = [
    (
        "http://purl.uniprot.org/core/Evidence_at_Protein_Level_Existence",
        1,
    ),
    (
        "http://purl.uniprot.org/core/Evidence_at_Transcript_Level_Existence",
        2,
    ),
    (
        "http://purl.uniprot.org/core/Inferred_from_Homology_Existence",
        3,
    ),
    ("http://purl.uniprot.org/core/Predicted_Existence", 4),
    ("http://purl.uniprot.org/core/Uncertain_Existence", 5),
];

pub fn existence_rank(iri: &str) -> Result<u8, SalonError> {
    EXISTENCE_LEVELS
        .iter()
        .find(|(known, _)| *known == iri)
        .map(|(_, rank)| *rank)
        .ok_or_else(|| SalonError::UnknownVocabularyValue(iri.to_string()))
}

/// Scalar value of a named variable in a SPARQL JSON result row, empty
/// if the variable is unbound.
pub fn binding_value<'a>(row: &'a Value, name: &str) -> &'a str {
    row.get(name)
        .and_then(|binding| binding.get("value"))
        .and_then(|value| value.as_str())
        .unwrap_or_default()
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DescriptionLine {
    pub database: &'static str,
    pub unique_identifier: String,
    pub entry_name: String,
    pub protein_name: String,
    pub organism_name: String,
    pub organism_identifier: String,
    pub gene_name: String,
    pub existence: u8,
}

impl DescriptionLine {
    pub fn from_binding(row: &Value) -> Result<Self, SalonError> {
        let reviewed = binding_value(row, "db");
        let database = if matches!(reviewed, "true" | "1") {
            "sp"
        } else {
            "tl"
        };
        let existence = existence_rank(binding_value(row, "ProteinExistence"))?;
        Ok(Self {
            database,
            unique_identifier: binding_value(row, "UniqueIdentifier").to_string(),
            entry_name: binding_value(row, "EntryName").to_string(),
            protein_name: binding_value(row, "ProteinName").to_string(),
            organism_name: binding_value(row, "OrganismName").to_string(),
            organism_identifier: binding_value(row, "OrganismIdentifier").to_string(),
            gene_name: binding_value(row, "GeneName").to_string(),
            existence,
        })
    }
}

// UniProtKB FASTA header layout.
impl fmt::Display for DescriptionLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            ">{}|{}|{} {} OS={} OX={} GN={} PE={}",
            self.database,
            self.unique_identifier,
            self.entry_name,
            self.protein_name,
            self.organism_name,
            self.organism_identifier,
            self.gene_name,
            self.existence
        )
    }
}

pub fn description_lines(bindings: &[Value]) -> Result<Vec<String>, SalonError> {
    bindings
        .iter()
        .map(|row| DescriptionLine::from_binding(row).map(|line| line.to_string()))
        .collect()
}
