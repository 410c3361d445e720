use std::fs::File;
use std::io::{BufReader, BufWriter, Write};
use std::path::Path;

use oxrdf::{Graph, GraphNameRef, QuadRef, Triple};
use oxrdfio::{RdfFormat, RdfParser, RdfSerializer};

use crate::error::SalonError;
use crate::ontology::Ontology;

pub fn format_from_path(path: &Path) -> Result<RdfFormat, SalonError> {
    let extension = path
        .extension()
        .and_then(|extension| extension.to_str())
        .ok_or_else(|| SalonError::UnsupportedRdfFormat(path.display().to_string()))?;
    RdfFormat::from_extension(extension)
        .ok_or_else(|| SalonError::UnsupportedRdfFormat(extension.to_string()))
}

pub fn read_graph(path: &Path) -> Result<Graph, SalonError> {
    let format = format_from_path(path)?;
    let file = File::open(path).map_err(|err| SalonError::FileRead {
        path: path.to_path_buf(),
        message: err.to_string(),
    })?;

    let mut graph = Graph::default();
    for quad in RdfParser::from_format(format).for_reader(BufReader::new(file)) {
        let quad = quad.map_err(|err| SalonError::GraphRead(err.to_string()))?;
        graph.insert(&Triple::new(quad.subject, quad.predicate, quad.object));
    }
    Ok(graph)
}

/// Writes the graph in the format selected by the output extension, with
/// the ontology namespace bound under its short prefix.
pub fn write_graph(graph: &Graph, path: &Path, ontology: &Ontology) -> Result<(), SalonError> {
    let format = format_from_path(path)?;
    let serializer = RdfSerializer::from_format(format)
        .with_prefix(ontology.prefix(), ontology.iri())
        .map_err(|err| SalonError::GraphWrite(err.to_string()))?;

    let file = File::create(path).map_err(|err| SalonError::FileWrite {
        path: path.to_path_buf(),
        message: err.to_string(),
    })?;
    let mut serializer = serializer.for_writer(BufWriter::new(file));
    for triple in graph.iter() {
        let quad = QuadRef::new(
            triple.subject,
            triple.predicate,
            triple.object,
            GraphNameRef::DefaultGraph,
        );
        serializer
            .serialize_quad(quad)
            .map_err(|err| SalonError::GraphWrite(err.to_string()))?;
    }
    let mut writer = serializer
        .finish()
        .map_err(|err| SalonError::GraphWrite(err.to_string()))?;
    writer
        .flush()
        .map_err(|err| SalonError::GraphWrite(err.to_string()))?;
    Ok(())
}
