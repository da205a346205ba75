//! SBOL v2 XML. `ComponentDefinition`s reference top-level `Sequence`
//! elements by identifier; annotations attach through
//! `SequenceAnnotation → Range` whose 1-based coordinates are decremented
//! on the way in. When no component resolves any sequence data, the first
//! top-level `Sequence` element is used on its own.

use parseq_core::{Annotation, Direction, Seq};

use crate::xml::{self, Element};
use crate::ParseError;

pub fn parse(content: &str, file_name: &str) -> Result<Vec<Seq>, ParseError> {
    let doc = xml::parse_document(content)?;
    let sequences: Vec<&Element> = doc.children_named("Sequence").collect();

    let mut seqs = Vec::new();
    for (index, component) in doc.children_named("ComponentDefinition").enumerate() {
        let Some(sequence) = resolve_sequence(component, &sequences) else {
            continue;
        };
        let raw = sequence.child_text("elements").unwrap_or("");
        let name = component
            .child_text("displayId")
            .map(str::to_string)
            .unwrap_or_else(|| format!("{}_{}", file_name, index + 1));
        let seq = Seq::new(name, raw);
        if seq.is_empty() {
            continue;
        }
        seqs.push(seq.with_annotations(component_annotations(component)));
    }

    if seqs.is_empty() {
        if let Some(sequence) = sequences.first() {
            let name = sequence.child_text("displayId").unwrap_or("Unnamed");
            let seq = Seq::new(name, sequence.child_text("elements").unwrap_or(""));
            if !seq.is_empty() {
                seqs.push(seq);
            }
        }
    }

    if seqs.is_empty() {
        return Err(ParseError::malformed(
            "sbol v2",
            "no ComponentDefinition or Sequence carries sequence data",
        ));
    }
    Ok(seqs)
}

/// Follow a component's `sequence` reference to a top-level `Sequence`,
/// matching either the target's `persistentIdentity` resource or its own
/// `about` identifier.
fn resolve_sequence<'a>(
    component: &Element,
    sequences: &[&'a Element],
) -> Option<&'a Element> {
    let reference = component.child("sequence")?.attr("resource")?;
    sequences
        .iter()
        .find(|sequence| {
            sequence
                .child("persistentIdentity")
                .and_then(|identity| identity.attr("resource"))
                == Some(reference)
                || sequence.attr("about") == Some(reference)
        })
        .copied()
}

fn component_annotations(component: &Element) -> Vec<Annotation> {
    component
        .children_named("sequenceAnnotation")
        .flat_map(|wrapper| wrapper.children_named("SequenceAnnotation"))
        .filter_map(|node| {
            let range = node.child("location")?.child("Range")?;
            let start: usize = range.child_text("start")?.parse().ok()?;
            let end: usize = range.child_text("end")?.parse().ok()?;
            Some(Annotation {
                name: node.child_text("displayId").unwrap_or("").to_string(),
                start: start.saturating_sub(1),
                end,
                direction: Direction::None,
                color: None,
                kind: None,
            })
        })
        .collect()
}
