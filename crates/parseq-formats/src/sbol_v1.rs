//! SBOL v1 XML. Real-world documents come in several shapes, so the parser
//! runs up to four passes and takes the first one that yields anything:
//!
//! 1. `RDF → Collection → component → DnaComponent`, lenient.
//! 2. A root-level single `DnaComponent`, lenient (annotations optional).
//! 3. Scavenge the whole tree for `DnaComponent` nodes, strict: a
//!    candidate needs both a name and a non-empty sequence.
//! 4. Scavenge the whole tree for bare `Sequence` nodes.

use parseq_core::{Annotation, Direction, Seq};

use crate::xml::{self, Element};
use crate::ParseError;

#[derive(Clone, Copy, PartialEq)]
enum Strictness {
    Lenient,
    Strict,
}

pub fn parse(content: &str) -> Result<Vec<Seq>, ParseError> {
    let doc = xml::parse_document(content)?;

    let mut seqs: Vec<Seq> = Vec::new();
    if let Some(collection) = doc.child("Collection") {
        for component in collection.children_named("component") {
            for dna in component.children_named("DnaComponent") {
                seqs.extend(component_to_seq(dna, Strictness::Lenient));
            }
        }
    }

    if seqs.is_empty() {
        if doc.name == "DnaComponent" {
            seqs.extend(component_to_seq(&doc, Strictness::Lenient));
        } else if let Some(dna) = doc.child("DnaComponent") {
            seqs.extend(component_to_seq(dna, Strictness::Lenient));
        }
    }

    if seqs.is_empty() {
        for dna in doc.find_descendants("DnaComponent") {
            seqs.extend(component_to_seq(dna, Strictness::Strict));
        }
    }

    if seqs.is_empty() {
        for node in doc.find_descendants("Sequence") {
            let name = node
                .child_text("displayId")
                .or_else(|| node.child_text("title"))
                .unwrap_or("Unnamed");
            let seq = Seq::new(name, node.child_text("elements").unwrap_or(""));
            if !seq.is_empty() {
                seqs.push(seq);
            }
        }
    }

    if seqs.is_empty() {
        return Err(ParseError::malformed(
            "sbol v1",
            "no DnaComponent or Sequence node carries sequence data",
        ));
    }
    Ok(seqs)
}

fn component_to_seq(dna: &Element, strictness: Strictness) -> Option<Seq> {
    let name = dna
        .child_text("name")
        .or_else(|| dna.child_text("displayId"));
    let raw = dna
        .child("dnaSequence")
        .and_then(|wrapper| wrapper.child("DnaSequence"))
        .and_then(|inner| inner.child_text("nucleotides"))
        .unwrap_or("");

    let seq = Seq::new(name.unwrap_or("Unnamed"), raw);
    if seq.is_empty() || (strictness == Strictness::Strict && name.is_none()) {
        return None;
    }

    let annotations = dna
        .children_named("annotation")
        .flat_map(|wrapper| wrapper.children_named("SequenceAnnotation"))
        .filter_map(annotation_to_canonical)
        .collect();
    Some(seq.with_annotations(annotations))
}

/// An annotation counts only when it names a part: `SequenceAnnotation`s
/// without a `subComponent → DnaComponent` are dropped.
fn annotation_to_canonical(node: &Element) -> Option<Annotation> {
    let start: usize = node.child_text("bioStart")?.parse().ok()?;
    let end: usize = node.child_text("bioEnd")?.parse().ok()?;
    let direction = match node.child_text("strand") {
        Some("+") => Direction::Forward,
        _ => Direction::Reverse,
    };

    let sub = node
        .child("subComponent")
        .and_then(|wrapper| wrapper.child("DnaComponent"))?;
    let name = sub
        .child_text("name")
        .or_else(|| sub.child_text("displayId"))
        .unwrap_or("Untitled");
    let kind = sub
        .child("type")
        .and_then(|t| t.attr("resource"))
        .map(str::to_string);

    Some(Annotation {
        name: name.to_string(),
        start: start.saturating_sub(1),
        end,
        direction,
        color: None,
        kind,
    })
}
