use crate::ontology::Ontology;

pub const UNIPROT_SPARQL_ENDPOINT: &str = "http://sparql.uniprot.org/sparql";

/// Looks up the accession number of a protein alignment sequence. The
/// accession pattern is OPTIONAL: a subject without one is a valid,
/// empty result rather than an error.
pub fn accession_lookup(ontology: &Ontology, uri: &str) -> String {
    let prefix = ontology.prefix();
    let iri = ontology.iri();
    format!(
        r#"PREFIX {prefix}:<{iri}>
SELECT ?ac
WHERE {{
    <{uri}> a {prefix}:ProteinAlignmentSequence .
    OPTIONAL {{ <{uri}> {prefix}:accessionNumber ?ac }} .
}}
"#
    )
}

/// Federated INSERT joining the sequence's accession against the UniProt
/// endpoint to assert organism, protein and cross-reference triples into
/// the local store. The accession is assumed to be a PDB identifier.
pub fn enrichment_insert(ontology: &Ontology, uri: &str, accession: &str) -> String {
    let prefix = ontology.prefix();
    let iri = ontology.iri();
    let accession = accession.to_uppercase();
    format!(
        r#"PREFIX rdfs:<http://www.w3.org/2000/01/rdf-schema#>
PREFIX up:<http://purl.uniprot.org/core/>
PREFIX pdb:<http://rdf.wwpdb.org/pdb/>
PREFIX {prefix}:<{iri}>
INSERT {{
    <{uri}> {prefix}:organism ?ncbi .
    <{uri}> {prefix}:associatedTo ?protein_uri .
    ?protein_uri a {prefix}:Protein .
    ?protein_uri {prefix}:description ?protfullname .
    ?protein_uri {prefix}:keyword ?protmnemonic .
    ?protein_uri {prefix}:proteinName ?protfullname .
    ?protein_uri rdfs:seeAlso ?organism .
    ?protein_uri rdfs:seeAlso ?protein .
    ?protein_uri rdfs:seeAlso ?pdb .
}}
WHERE {{
    <{uri}> a {prefix}:ProteinAlignmentSequence .
    SERVICE <{UNIPROT_SPARQL_ENDPOINT}> {{
        BIND(pdb:{accession} AS ?pdb) .
        ?protein a up:Protein ;
                 rdfs:seeAlso ?pdb ;
                 up:recommendedName ?protname ;
                 up:mnemonic ?protmnemonic ;
                 up:organism ?organism .
        ?protname up:fullName ?protfullname .
        ?organism up:mnemonic ?orgmnemonic ;
                  up:scientificName ?orgscientific .
        BIND(STRAFTER(STR(?protein), "http://purl.uniprot.org/uniprot/") AS ?ac) .
        BIND(STRAFTER(STR(?organism), "http://purl.uniprot.org/taxonomy/") AS ?ncbi) .
        BIND(IRI(CONCAT("{iri}", ?ac)) AS ?protein_uri)
    }}
}}
"#
    )
}

/// Federated SELECT retrieving everything needed for a UniProtKB-style
/// FASTA description line of a protein alignment sequence.
pub fn export_select(ontology: &Ontology, uri: &str) -> String {
    let prefix = ontology.prefix();
    let iri = ontology.iri();
    format!(
        r#"PREFIX rdfs:<http://www.w3.org/2000/01/rdf-schema#>
PREFIX skos:<http://www.w3.org/2004/02/skos/core#>
PREFIX up:<http://purl.uniprot.org/core/>
PREFIX {prefix}:<{iri}>
SELECT DISTINCT ?db ?UniqueIdentifier ?EntryName
       ?OrganismName ?OrganismIdentifier ?ProteinName
       ?GeneName ?ProteinExistence
WHERE {{
    <{uri}> a {prefix}:ProteinAlignmentSequence ;
            {prefix}:identifier ?UniqueIdentifier ;
            {prefix}:organism ?OrganismIdentifier ;
            {prefix}:associatedTo ?protein .
    ?protein a {prefix}:Protein ;
             {prefix}:proteinName ?ProteinName ;
             rdfs:seeAlso ?pdb .
    SERVICE <{UNIPROT_SPARQL_ENDPOINT}> {{
        ?pdb a up:Protein ;
             up:reviewed ?db ;
             up:encodedBy ?gene ;
             up:mnemonic ?EntryName ;
             up:existence ?ProteinExistence ;
             up:organism ?organism .
        ?gene skos:prefLabel ?GeneName .
        ?organism a up:Taxon ;
                  up:scientificName ?OrganismName .
    }}
}}
"#
    )
}
