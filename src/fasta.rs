use std::fmt;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use clap::ValueEnum;
use oxrdf::vocab::rdf;
use oxrdf::{Graph, Literal, TripleRef};

use crate::error::SalonError;
use crate::ontology::{self, Ontology, instance_name};

/// How FASTA-derived sequences are typed. The format itself does not
/// say, so the caller must decide.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum SequenceKind {
    Protein,
    Dna,
}

impl fmt::Display for SequenceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SequenceKind::Protein => write!(f, "protein"),
            SequenceKind::Dna => write!(f, "dna"),
        }
    }
}

struct FastaRecord {
    id: String,
    residues: String,
}

/// Translates a FASTA alignment file into an ontology triple graph with
/// a single implicit sub-alignment named after the file stem.
pub fn from_fasta(
    path: &Path,
    ontology: &Ontology,
    kind: SequenceKind,
) -> Result<Graph, SalonError> {
    let records = read_records(path)?;
    let instance = instance_name(path)?;

    let alignment_class = ontology.term(ontology::ALIGNMENT)?;
    let subalignment_class = ontology.term(ontology::SUB_ALIGNMENT)?;
    let sequence_class = match kind {
        SequenceKind::Protein => ontology.term(ontology::PROTEIN_ALIGNMENT_SEQUENCE)?,
        SequenceKind::Dna => ontology.term(ontology::DNA_ALIGNMENT_SEQUENCE)?,
    };

    let gap_character = ontology.term(ontology::GAP_CHARACTER)?;
    let has_subalignment = ontology.term(ontology::HAS_SUB_ALIGNMENT)?;
    let subalignment_name = ontology.term(ontology::SUB_ALIGNMENT_NAME)?;
    let has_sequence = ontology.term(ontology::HAS_SEQUENCE)?;
    let identifier = ontology.term(ontology::IDENTIFIER)?;
    let sequence_pred = ontology.term(ontology::SEQUENCE)?;
    let length = ontology.term(ontology::LENGTH)?;
    let accession_number = ontology.term(ontology::ACCESSION_NUMBER)?;

    let mut graph = Graph::default();

    let alignment_uri = ontology.term(&instance)?;
    graph.insert(TripleRef::new(&alignment_uri, rdf::TYPE, &alignment_class));
    let gap_literal = Literal::new_simple_literal("-");
    graph.insert(TripleRef::new(&alignment_uri, &gap_character, &gap_literal));

    let subalignment_uri = ontology.term(&format!("{instance}_subalignment"))?;
    graph.insert(TripleRef::new(
        &alignment_uri,
        &has_subalignment,
        &subalignment_uri,
    ));
    graph.insert(TripleRef::new(
        &subalignment_uri,
        rdf::TYPE,
        &subalignment_class,
    ));
    let name_literal = Literal::new_simple_literal(instance.as_str());
    graph.insert(TripleRef::new(
        &subalignment_uri,
        &subalignment_name,
        &name_literal,
    ));

    for record in &records {
        let seq_uri = ontology.term(&format!("{instance}_{}", record.id))?;
        graph.insert(TripleRef::new(&subalignment_uri, &has_sequence, &seq_uri));
        let id_literal = Literal::new_simple_literal(record.id.as_str());
        graph.insert(TripleRef::new(&seq_uri, &identifier, &id_literal));
        graph.insert(TripleRef::new(&seq_uri, rdf::TYPE, &sequence_class));

        let residues = record.residues.to_uppercase();
        let residues_literal = Literal::new_simple_literal(residues.as_str());
        graph.insert(TripleRef::new(&seq_uri, &sequence_pred, &residues_literal));
        let length_literal = Literal::from(residues.chars().count() as i64);
        graph.insert(TripleRef::new(&seq_uri, &length, &length_literal));
        let accession_literal = Literal::new_simple_literal(record.id.to_uppercase());
        graph.insert(TripleRef::new(
            &seq_uri,
            &accession_number,
            &accession_literal,
        ));
    }

    Ok(graph)
}

fn read_records(path: &Path) -> Result<Vec<FastaRecord>, SalonError> {
    let file = File::open(path).map_err(|err| SalonError::FileRead {
        path: path.to_path_buf(),
        message: err.to_string(),
    })?;
    let reader = BufReader::new(file);

    let mut records = Vec::new();
    let mut current: Option<FastaRecord> = None;

    for line in reader.lines() {
        let line = line.map_err(|err| SalonError::FileRead {
            path: path.to_path_buf(),
            message: err.to_string(),
        })?;
        let trimmed = line.trim();
        if let Some(header) = trimmed.strip_prefix('>') {
            if let Some(record) = current.take() {
                records.push(record);
            }
            let id = header
                .split_whitespace()
                .next()
                .unwrap_or_default()
                .to_string();
            if id.is_empty() {
                return Err(SalonError::MalformedFasta(
                    "record header without an identifier".to_string(),
                ));
            }
            current = Some(FastaRecord {
                id,
                residues: String::new(),
            });
        } else if !trimmed.is_empty() {
            match current.as_mut() {
                Some(record) => record.residues.push_str(trimmed),
                None => {
                    return Err(SalonError::MalformedFasta(
                        "sequence data before the first '>' header".to_string(),
                    ));
                }
            }
        }
    }
    if let Some(record) = current {
        records.push(record);
    }

    if records.is_empty() {
        return Err(SalonError::MalformedFasta("no records found".to_string()));
    }
    Ok(records)
}
