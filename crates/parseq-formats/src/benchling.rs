//! Benchling JSON export: the closest format to the canonical model.
//! Coordinates are already 0-based half-open and pass through; `strand`
//! tokens go through the shared direction logic, numbers and strings both.

use serde_json::Value;

use parseq_core::{parse_direction, Annotation, Direction, Seq};

use crate::ParseError;

pub fn parse(content: &str) -> Result<Vec<Seq>, ParseError> {
    let value: Value =
        serde_json::from_str(content).map_err(|e| ParseError::malformed("benchling", e.to_string()))?;

    let bases = value.get("bases").and_then(Value::as_str).unwrap_or("");
    let name = value
        .get("name")
        .and_then(Value::as_str)
        .filter(|n| !n.trim().is_empty())
        .or_else(|| value.get("_id").and_then(Value::as_str))
        .unwrap_or("");
    let seq = Seq::new(name, bases);
    if seq.is_empty() {
        return Err(ParseError::EmptySequence);
    }

    let annotations = value
        .get("annotations")
        .and_then(Value::as_array)
        .map(|list| list.iter().map(annotation_from_json).collect())
        .unwrap_or_default();
    Ok(vec![seq.with_annotations(annotations)])
}

fn annotation_from_json(item: &Value) -> Annotation {
    let field_str = |key: &str| {
        item.get(key)
            .and_then(Value::as_str)
            .filter(|v| !v.is_empty())
            .map(str::to_string)
    };
    Annotation {
        name: field_str("name").unwrap_or_default(),
        start: item.get("start").and_then(Value::as_u64).unwrap_or(0) as usize,
        end: item.get("end").and_then(Value::as_u64).unwrap_or(0) as usize,
        direction: strand_direction(item.get("strand")),
        color: field_str("color"),
        kind: field_str("type"),
    }
}

fn strand_direction(strand: Option<&Value>) -> Direction {
    match strand {
        Some(Value::Number(n)) => match n.as_i64() {
            Some(1) => Direction::Forward,
            Some(-1) => Direction::Reverse,
            _ => Direction::None,
        },
        Some(Value::String(token)) => parse_direction(token),
        _ => Direction::None,
    }
}
