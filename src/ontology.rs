use std::path::Path;

use oxrdf::NamedNode;

use crate::config::Config;
use crate::error::SalonError;

pub const ALIGNMENT: &str = "Alignment";
pub const SUB_ALIGNMENT: &str = "SubAlignment";
pub const ALIGNMENT_SCORE: &str = "AlignmentScore";
pub const PROTEIN_ALIGNMENT_SEQUENCE: &str = "ProteinAlignmentSequence";
pub const DNA_ALIGNMENT_SEQUENCE: &str = "DNAAlignmentSequence";
pub const PROTEIN: &str = "Protein";

pub const GAP_CHARACTER: &str = "gapCharacter";
pub const HAS_SUB_ALIGNMENT: &str = "hasSubAlignment";
pub const SUB_ALIGNMENT_NAME: &str = "subAlignmentName";
pub const HAS_ALIGNMENT_SCORE: &str = "hasAlignmentScore";
pub const SCORE: &str = "score";
pub const HAS_SEQUENCE: &str = "hasSequence";
pub const IDENTIFIER: &str = "identifier";
pub const SEQUENCE: &str = "sequence";
pub const LENGTH: &str = "length";
pub const ACCESSION_NUMBER: &str = "accessionNumber";
pub const DESCRIPTION: &str = "description";
pub const ORGANISM: &str = "organism";
pub const HAS_FEATURE: &str = "hasFeature";
pub const F_TYPE: &str = "FType";
pub const F_NOTE: &str = "FNote";
pub const F_START: &str = "FStart";
pub const F_STOP: &str = "FStop";
pub const F_SCORE: &str = "FScore";
pub const ASSOCIATED_TO: &str = "associatedTo";
pub const KEYWORD: &str = "keyword";
pub const PROTEIN_NAME: &str = "proteinName";

/// Mints every generated resource identifier under the configured
/// ontology IRI, bound to its short prefix at serialization time.
#[derive(Debug, Clone)]
pub struct Ontology {
    iri: String,
    prefix: String,
}

impl Ontology {
    pub fn new(config: &Config) -> Self {
        Self {
            iri: config.ontology_iri.clone(),
            prefix: config.ontology_namespace.clone(),
        }
    }

    pub fn iri(&self) -> &str {
        &self.iri
    }

    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    pub fn term(&self, local: &str) -> Result<NamedNode, SalonError> {
        let iri = format!("{}{}", self.iri, local);
        NamedNode::new(&iri).map_err(|err| SalonError::InvalidIri {
            iri,
            message: err.to_string(),
        })
    }
}

/// Instance name for a translation run: the input file's base name
/// without its extension.
pub fn instance_name(path: &Path) -> Result<String, SalonError> {
    path.file_stem()
        .and_then(|stem| stem.to_str())
        .map(str::to_string)
        .ok_or_else(|| SalonError::UnsupportedInput(path.display().to_string()))
}

#[cfg(test)]
mod tests {
    use std::path::Path;

    use super::*;

    fn ontology() -> Ontology {
        Ontology::new(&Config::default())
    }

    #[test]
    fn term_minted_under_ontology_iri() {
        let term = ontology().term(ALIGNMENT).unwrap();
        assert_eq!(
            term.as_str(),
            "http://www.ontologies.khaos.uma.es/salon/Alignment"
        );
    }

    #[test]
    fn term_rejects_invalid_characters() {
        let err = ontology().term("bad name").unwrap_err();
        assert!(matches!(err, SalonError::InvalidIri { .. }));
    }

    #[test]
    fn instance_name_strips_extension() {
        let name = instance_name(Path::new("/data/BB11001.xml")).unwrap();
        assert_eq!(name, "BB11001");
    }
}
