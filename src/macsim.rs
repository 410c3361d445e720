use std::fs;
use std::path::Path;

use oxrdf::vocab::rdf;
use oxrdf::{Graph, Literal, TripleRef};
use serde::Deserialize;

use crate::error::SalonError;
use crate::ontology::{self, Ontology, instance_name};

#[derive(Debug, Deserialize)]
struct MacsimRoot {
    #[serde(rename = "alignment", default)]
    alignments: Vec<AlignmentBlock>,
}

#[derive(Debug, Deserialize)]
struct AlignmentBlock {
    #[serde(rename = "aln-name", default)]
    names: Vec<String>,
    #[serde(rename = "aln-score", default)]
    scores: Vec<String>,
    #[serde(rename = "sequence", default)]
    sequences: Vec<SequenceBlock>,
}

#[derive(Debug, Deserialize)]
struct SequenceBlock {
    #[serde(rename = "@seq-type")]
    seq_type: String,
    #[serde(rename = "seq-name")]
    name: String,
    #[serde(rename = "seq-data")]
    data: Option<String>,
    #[serde(rename = "fitem", default)]
    features: Vec<FeatureBlock>,
    #[serde(rename = "seq-info")]
    info: Option<SequenceInfo>,
}

#[derive(Debug, Deserialize)]
struct FeatureBlock {
    ftype: String,
    fnote: String,
    fstart: String,
    fstop: String,
    fscore: String,
}

#[derive(Debug, Deserialize)]
struct SequenceInfo {
    #[serde(rename = "accession", default)]
    accessions: Vec<String>,
    #[serde(rename = "definition", default)]
    definitions: Vec<String>,
    #[serde(rename = "organism", default)]
    organisms: Vec<String>,
    #[serde(rename = "ftable")]
    ftable: Option<FeatureTable>,
}

#[derive(Debug, Deserialize)]
struct FeatureTable {
    #[serde(rename = "fitem", default)]
    features: Vec<FeatureBlock>,
}

impl SequenceBlock {
    // Feature blocks appear either directly under `sequence` or inside
    // the `seq-info`/`ftable` wrapper; indices span both in document order.
    fn feature_items(&self) -> impl Iterator<Item = &FeatureBlock> {
        self.features.iter().chain(
            self.info
                .iter()
                .flat_map(|info| info.ftable.iter().flat_map(|table| table.features.iter())),
        )
    }
}

/// Translates a MACSIM/XML alignment file into an ontology triple graph.
pub fn from_macsim_xml(path: &Path, ontology: &Ontology) -> Result<Graph, SalonError> {
    let content = fs::read_to_string(path).map_err(|err| SalonError::FileRead {
        path: path.to_path_buf(),
        message: err.to_string(),
    })?;
    let root: MacsimRoot =
        quick_xml::de::from_str(&content).map_err(|err| SalonError::MalformedXml(err.to_string()))?;
    let instance = instance_name(path)?;

    let alignment_class = ontology.term(ontology::ALIGNMENT)?;
    let subalignment_class = ontology.term(ontology::SUB_ALIGNMENT)?;
    let score_class = ontology.term(ontology::ALIGNMENT_SCORE)?;
    let protein_class = ontology.term(ontology::PROTEIN_ALIGNMENT_SEQUENCE)?;
    let dna_class = ontology.term(ontology::DNA_ALIGNMENT_SEQUENCE)?;

    let gap_character = ontology.term(ontology::GAP_CHARACTER)?;
    let has_subalignment = ontology.term(ontology::HAS_SUB_ALIGNMENT)?;
    let subalignment_name_pred = ontology.term(ontology::SUB_ALIGNMENT_NAME)?;
    let has_score = ontology.term(ontology::HAS_ALIGNMENT_SCORE)?;
    let score_pred = ontology.term(ontology::SCORE)?;
    let has_sequence = ontology.term(ontology::HAS_SEQUENCE)?;
    let identifier = ontology.term(ontology::IDENTIFIER)?;
    let sequence_pred = ontology.term(ontology::SEQUENCE)?;
    let length = ontology.term(ontology::LENGTH)?;
    let accession_number = ontology.term(ontology::ACCESSION_NUMBER)?;
    let description = ontology.term(ontology::DESCRIPTION)?;
    let organism = ontology.term(ontology::ORGANISM)?;
    let has_feature = ontology.term(ontology::HAS_FEATURE)?;
    let ftype = ontology.term(ontology::F_TYPE)?;
    let fnote = ontology.term(ontology::F_NOTE)?;
    let fstart = ontology.term(ontology::F_START)?;
    let fstop = ontology.term(ontology::F_STOP)?;
    let fscore = ontology.term(ontology::F_SCORE)?;

    let mut graph = Graph::default();
    let gap_literal = Literal::new_simple_literal("-");

    for alignment in &root.alignments {
        let alignment_uri = ontology.term(&instance)?;
        graph.insert(TripleRef::new(&alignment_uri, rdf::TYPE, &alignment_class));
        graph.insert(TripleRef::new(&alignment_uri, &gap_character, &gap_literal));

        for raw_name in &alignment.names {
            let subalignment_name = raw_name.trim().replace('/', "-");
            let subalignment_uri = ontology.term(&format!("{instance}_{subalignment_name}"))?;
            graph.insert(TripleRef::new(
                &alignment_uri,
                &has_subalignment,
                &subalignment_uri,
            ));
            graph.insert(TripleRef::new(&subalignment_uri, rdf::TYPE, &subalignment_class));
            let name_literal = Literal::new_simple_literal(subalignment_name.as_str());
            graph.insert(TripleRef::new(
                &subalignment_uri,
                &subalignment_name_pred,
                &name_literal,
            ));

            let score_uri = ontology.term(&format!("{instance}_{subalignment_name}_score"))?;
            for score in &alignment.scores {
                graph.insert(TripleRef::new(&subalignment_uri, &has_score, &score_uri));
                graph.insert(TripleRef::new(&score_uri, rdf::TYPE, &score_class));
                let score_literal = Literal::new_simple_literal(score.trim());
                graph.insert(TripleRef::new(&score_uri, &score_pred, &score_literal));
            }

            for sequence in &alignment.sequences {
                let seq_name = sequence.name.trim();
                let seq_uri =
                    ontology.term(&format!("{instance}_{subalignment_name}_{seq_name}"))?;
                graph.insert(TripleRef::new(&subalignment_uri, &has_sequence, &seq_uri));
                let id_literal = Literal::new_simple_literal(seq_name);
                graph.insert(TripleRef::new(&seq_uri, &identifier, &id_literal));

                let class = if sequence.seq_type == "Protein" {
                    &protein_class
                } else {
                    &dna_class
                };
                graph.insert(TripleRef::new(&seq_uri, rdf::TYPE, class));

                if let Some(data) = &sequence.data {
                    let text = data.trim();
                    let data_literal = Literal::new_simple_literal(text);
                    graph.insert(TripleRef::new(&seq_uri, &sequence_pred, &data_literal));
                    let length_literal = Literal::from(text.chars().count() as i64);
                    graph.insert(TripleRef::new(&seq_uri, &length, &length_literal));
                }

                for (index, feature) in sequence.feature_items().enumerate() {
                    let feature_uri = ontology.term(&format!(
                        "{instance}_{subalignment_name}_{seq_name}_f{index}"
                    ))?;
                    graph.insert(TripleRef::new(&seq_uri, &has_feature, &feature_uri));
                    for (predicate, value) in [
                        (&ftype, feature.ftype.as_str()),
                        (&fnote, feature.fnote.as_str()),
                        (&fstart, feature.fstart.as_str()),
                        (&fstop, feature.fstop.as_str()),
                        (&fscore, feature.fscore.as_str()),
                    ] {
                        let value_literal = Literal::new_simple_literal(value);
                        graph.insert(TripleRef::new(&feature_uri, predicate, &value_literal));
                    }
                }

                if let Some(info) = &sequence.info {
                    for accession in &info.accessions {
                        let accession_literal = Literal::new_simple_literal(accession.as_str());
                        graph.insert(TripleRef::new(
                            &seq_uri,
                            &accession_number,
                            &accession_literal,
                        ));
                    }
                    for definition in &info.definitions {
                        let definition_literal = Literal::new_simple_literal(definition.trim());
                        graph.insert(TripleRef::new(&seq_uri, &description, &definition_literal));
                    }
                    for organism_text in &info.organisms {
                        let organism_literal = Literal::new_simple_literal(organism_text.trim());
                        graph.insert(TripleRef::new(&seq_uri, &organism, &organism_literal));
                    }
                }
            }
        }
    }

    Ok(graph)
}
