//! JBEI sequence XML. Feature starts use the 1-based `genbankStart`
//! convention and must be decremented on the way in; strandedness arrives
//! as a `complement` boolean rather than a signed token.

use parseq_core::{Annotation, Direction, Seq};

use crate::xml;
use crate::ParseError;

pub fn parse(content: &str) -> Result<Vec<Seq>, ParseError> {
    let doc = xml::parse_document(content)?;

    let name = doc.child_text("name").unwrap_or("Unnamed");
    let raw = doc.child_text("sequence").unwrap_or("");
    let seq = Seq::new(name, raw);
    if seq.is_empty() {
        return Err(ParseError::EmptySequence);
    }

    let mut annotations = Vec::new();
    if let Some(features) = doc.child("features") {
        for feature in features.children_named("feature") {
            let Some(location) = feature.child("location") else {
                continue;
            };
            let start = location
                .child_text("genbankStart")
                .and_then(|p| p.parse::<usize>().ok());
            let end = location.child_text("end").and_then(|p| p.parse::<usize>().ok());
            let (Some(start), Some(end)) = (start, end) else {
                continue;
            };

            let direction = if feature.child_text("complement") == Some("true") {
                Direction::Reverse
            } else {
                Direction::Forward
            };
            annotations.push(Annotation {
                name: feature.child_text("label").unwrap_or("Untitled").to_string(),
                start: start.saturating_sub(1),
                end,
                direction,
                color: None,
                kind: feature.child_text("type").map(str::to_string),
            });
        }
    }
    Ok(vec![seq.with_annotations(annotations)])
}
