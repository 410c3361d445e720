use std::collections::BTreeSet;
use std::path::Path;

use oxrdf::vocab::rdf;
use oxrdf::{Graph, Literal, NamedNode, TripleRef};

use salon_cli::config::Config;
use salon_cli::error::SalonError;
use salon_cli::fasta::{from_fasta, SequenceKind};
use salon_cli::ontology::Ontology;

const NS: &str = "http://www.ontologies.khaos.uma.es/salon/";

fn ontology() -> Ontology {
    Ontology::new(&Config::default())
}

fn node(suffix: &str) -> NamedNode {
    NamedNode::new(format!("{NS}{suffix}")).unwrap()
}

fn translate(kind: SequenceKind) -> Graph {
    from_fasta(Path::new("tests/fixtures/globins.fa"), &ontology(), kind).unwrap()
}

#[test]
fn single_implicit_subalignment_named_after_file_stem() {
    let graph = translate(SequenceKind::Protein);
    let alignment = node("globins");
    let subalignment = node("globins_subalignment");
    let has_subalignment = node("hasSubAlignment");
    let subalignment_class = node("SubAlignment");
    let name_pred = node("subAlignmentName");
    let name = Literal::new_simple_literal("globins");

    assert!(graph.contains(TripleRef::new(&alignment, &has_subalignment, &subalignment)));
    assert!(graph.contains(TripleRef::new(&subalignment, rdf::TYPE, &subalignment_class)));
    assert!(graph.contains(TripleRef::new(&subalignment, &name_pred, &name)));

    let subalignment_count = graph
        .iter()
        .filter(|triple| triple.predicate == has_subalignment.as_ref())
        .count();
    assert_eq!(subalignment_count, 1);
}

#[test]
fn one_sequence_per_record_typed_by_the_caller() {
    let graph = translate(SequenceKind::Protein);
    let protein_class = node("ProteinAlignmentSequence");
    let first = node("globins_P69905");
    let second = node("globins_p68871");

    assert!(graph.contains(TripleRef::new(&first, rdf::TYPE, &protein_class)));
    assert!(graph.contains(TripleRef::new(&second, rdf::TYPE, &protein_class)));

    let dna_graph = translate(SequenceKind::Dna);
    let dna_class = node("DNAAlignmentSequence");
    assert!(dna_graph.contains(TripleRef::new(&first, rdf::TYPE, &dna_class)));
}

#[test]
fn residues_and_accession_are_uppercased() {
    let graph = translate(SequenceKind::Protein);
    let second = node("globins_p68871");

    let identifier = node("identifier");
    let raw_id = Literal::new_simple_literal("p68871");
    assert!(graph.contains(TripleRef::new(&second, &identifier, &raw_id)));

    let accession_pred = node("accessionNumber");
    let accession = Literal::new_simple_literal("P68871");
    assert!(graph.contains(TripleRef::new(&second, &accession_pred, &accession)));

    let residues = "MVHLTPEEKSAVTALWGKV--NVDEVGGEALGRLLVVYPWTQRFFESFGDLSTPDAVMGNPKVKAHGKKVLGAFSDGLAHLDNLKGTFATLSELHCDKLHVDPENFRL";
    let sequence_pred = node("sequence");
    let residues_literal = Literal::new_simple_literal(residues);
    assert!(graph.contains(TripleRef::new(&second, &sequence_pred, &residues_literal)));

    let length_pred = node("length");
    let length = Literal::from(residues.chars().count() as i64);
    assert!(graph.contains(TripleRef::new(&second, &length_pred, &length)));
}

#[test]
fn multi_line_records_are_concatenated() {
    let graph = translate(SequenceKind::Protein);
    let first = node("globins_P69905");
    let sequence_pred = node("sequence");
    let residues = "MVLSPADKTNVKAAWGKVGAHAGEYGAEALERMFLSFPTTKTYFPHF-DLSHGSAQVKGHGKKVADALTNAVAHVDDMPNALSALSDLHAHKL";
    let residues_literal = Literal::new_simple_literal(residues);
    assert!(graph.contains(TripleRef::new(&first, &sequence_pred, &residues_literal)));
}

#[test]
fn translation_is_deterministic() {
    let first: BTreeSet<String> = translate(SequenceKind::Protein)
        .iter()
        .map(|triple| triple.to_string())
        .collect();
    let second: BTreeSet<String> = translate(SequenceKind::Protein)
        .iter()
        .map(|triple| triple.to_string())
        .collect();
    assert_eq!(first, second);
}

#[test]
fn data_before_first_header_is_malformed() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("headerless.fasta");
    std::fs::write(&path, "MVLSPADKT\n>P69905\nMVLSPADKT\n").unwrap();
    let err = from_fasta(&path, &ontology(), SequenceKind::Protein).unwrap_err();
    assert!(matches!(err, SalonError::MalformedFasta(_)));
}

#[test]
fn empty_file_is_malformed() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("empty.fa");
    std::fs::write(&path, "").unwrap();
    let err = from_fasta(&path, &ontology(), SequenceKind::Protein).unwrap_err();
    assert!(matches!(err, SalonError::MalformedFasta(_)));
}
