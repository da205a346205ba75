//! iGEM Registry part XML: `rsbpml → part_list → part`. Only the first
//! part is read. Features have no native name field, so annotation names
//! are synthesized as `"{direction}-{startpos}"` from the raw source text.

use parseq_core::{Annotation, Seq};

use crate::xml;
use crate::ParseError;

pub fn parse(content: &str) -> Result<Vec<Seq>, ParseError> {
    let doc = xml::parse_document(content)?;
    let part = doc
        .find_descendants("part")
        .into_iter()
        .next()
        .ok_or_else(|| ParseError::malformed("biobrick", "no part element"))?;

    let name = part
        .child_text("part_name")
        .ok_or_else(|| ParseError::malformed("biobrick", "part has no part_name"))?;
    let raw = part
        .child("sequences")
        .and_then(|sequences| sequences.child_text("seq_data"))
        .ok_or_else(|| ParseError::malformed("biobrick", "part has no seq_data"))?;

    let seq = Seq::new(name, raw);
    if seq.is_empty() {
        return Err(ParseError::EmptySequence);
    }

    let mut annotations = Vec::new();
    if let Some(features) = part.child("features") {
        for feature in features.children_named("feature") {
            let direction = feature.child_text("direction").unwrap_or("");
            let Some(start) = feature
                .child_text("startpos")
                .and_then(|p| p.parse::<usize>().ok())
            else {
                continue;
            };
            let Some(end) = feature
                .child_text("endpos")
                .and_then(|p| p.parse::<usize>().ok())
            else {
                continue;
            };
            annotations.push(Annotation {
                name: format!("{direction}-{start}"),
                start: start.saturating_sub(1),
                end,
                direction: parseq_core::parse_direction(direction),
                color: None,
                kind: feature.child_text("type").map(str::to_string),
            });
        }
    }
    Ok(vec![seq.with_annotations(annotations)])
}
