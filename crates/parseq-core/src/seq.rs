use serde::{Deserialize, Serialize};

use crate::normalize::{clean_and_complement, guess_type};

/// Molecule type, always inferred from cleaned sequence content.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SeqType {
    Dna,
    Rna,
    Aa,
    #[serde(other)]
    Unknown,
}

impl std::fmt::Display for SeqType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SeqType::Dna => write!(f, "dna"),
            SeqType::Rna => write!(f, "rna"),
            SeqType::Aa => write!(f, "aa"),
            SeqType::Unknown => write!(f, "unknown"),
        }
    }
}

/// Annotation orientation, carried on the wire as -1, 0, or 1.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(into = "i8", from = "i8")]
pub enum Direction {
    Forward,
    Reverse,
    None,
}

impl Direction {
    pub fn as_i8(&self) -> i8 {
        match self {
            Direction::Forward => 1,
            Direction::Reverse => -1,
            Direction::None => 0,
        }
    }

    pub fn from_i8(v: i8) -> Self {
        match v {
            1 => Direction::Forward,
            -1 => Direction::Reverse,
            _ => Direction::None,
        }
    }
}

impl Default for Direction {
    fn default() -> Self {
        Direction::None
    }
}

impl From<Direction> for i8 {
    fn from(d: Direction) -> i8 {
        d.as_i8()
    }
}

impl From<i8> for Direction {
    fn from(v: i8) -> Self {
        Direction::from_i8(v)
    }
}

/// A positional annotation on a sequence. Coordinates are 0-based and
/// half-open regardless of the convention the source file used.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Annotation {
    pub name: String,
    pub start: usize,
    pub end: usize,
    #[serde(default)]
    pub direction: Direction,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
}

impl Annotation {
    pub fn new(name: impl Into<String>, start: usize, end: usize, direction: Direction) -> Self {
        Self {
            name: name.into(),
            start,
            end,
            direction,
            color: None,
            kind: None,
        }
    }

}

/// The canonical parsed sequence: a name, an inferred molecule type, the
/// cleaned primary strand, and zero or more annotations.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Seq {
    pub name: String,
    #[serde(rename = "type")]
    pub seq_type: SeqType,
    pub seq: String,
    #[serde(default)]
    pub annotations: Vec<Annotation>,
}

impl Seq {
    /// Build a sequence from raw input: characters outside the IUPAC
    /// complement table are dropped, case is preserved, and the molecule
    /// type is inferred from what survives.
    pub fn new(name: impl Into<String>, raw: &str) -> Self {
        let (seq, _) = clean_and_complement(raw);
        let seq_type = guess_type(&seq);
        Self {
            name: name.into(),
            seq_type,
            seq,
            annotations: Vec::new(),
        }
    }

    pub fn with_annotations(mut self, annotations: Vec<Annotation>) -> Self {
        self.annotations = annotations;
        self
    }

    pub fn len(&self) -> usize {
        self.seq.len()
    }

    pub fn is_empty(&self) -> bool {
        self.seq.is_empty()
    }
}
