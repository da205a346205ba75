//! SnapGene `.dna` binary container. The file is a fixed header followed
//! by length-prefixed blocks: a 1-byte type tag and a big-endian u32 size.
//! Tag 0 carries a circularity byte plus the bases, tag 10 an embedded XML
//! feature table. Every other tag is skipped by consuming exactly its
//! declared size; each branch works on the already-sliced block so the
//! stream can never desynchronize.

use byteorder::{BigEndian, ByteOrder};

use parseq_core::{Annotation, Direction, Seq};

use crate::xml;
use crate::ParseError;

const SEQUENCE_BLOCK: u8 = 0;
const FEATURES_BLOCK: u8 = 10;

struct Cursor<'a> {
    data: &'a [u8],
    pos: usize,
}

impl<'a> Cursor<'a> {
    fn new(data: &'a [u8]) -> Self {
        Self { data, pos: 0 }
    }

    fn read(&mut self, n: usize) -> Result<&'a [u8], ParseError> {
        let end = self.pos.checked_add(n).filter(|&end| end <= self.data.len());
        let Some(end) = end else {
            return Err(ParseError::malformed(
                "snapgene",
                format!(
                    "unexpected end of stream at byte {} (wanted {} more)",
                    self.pos, n
                ),
            ));
        };
        let slice = &self.data[self.pos..end];
        self.pos = end;
        Ok(slice)
    }

    fn read_u8(&mut self) -> Result<u8, ParseError> {
        Ok(self.read(1)?[0])
    }

    fn read_u32(&mut self) -> Result<u32, ParseError> {
        Ok(BigEndian::read_u32(self.read(4)?))
    }

    fn remaining(&self) -> bool {
        self.pos < self.data.len()
    }
}

pub fn parse(data: &[u8]) -> Result<Vec<Seq>, ParseError> {
    let mut cursor = Cursor::new(data);

    // Header: document tag, a length that must be 14, the ASCII title
    // "SnapGene", then three u16 version fields.
    cursor.read(1)?;
    let header_len = cursor.read_u32()?;
    if header_len != 14 {
        return Err(ParseError::malformed(
            "snapgene",
            format!("wrong header length {header_len}, expected 14"),
        ));
    }
    let title = cursor.read(8)?;
    if title != b"SnapGene" {
        return Err(ParseError::malformed(
            "snapgene",
            format!(
                "wrong file title {:?}, expected \"SnapGene\"",
                String::from_utf8_lossy(title)
            ),
        ));
    }
    cursor.read(6)?;

    let mut sequence: Option<String> = None;
    let mut annotations: Vec<Annotation> = Vec::new();
    while cursor.remaining() {
        let tag = cursor.read_u8()?;
        let size = cursor.read_u32()? as usize;
        let block = cursor.read(size)?;
        match tag {
            SEQUENCE_BLOCK => {
                // First byte is the circularity flag, the rest is the strand
                if !block.is_empty() {
                    sequence = Some(String::from_utf8_lossy(&block[1..]).into_owned());
                }
            }
            FEATURES_BLOCK => annotations.extend(parse_feature_block(block)?),
            _ => {}
        }
    }

    let raw = sequence.ok_or(ParseError::EmptySequence)?;
    let seq = Seq::new("", &raw);
    if seq.is_empty() {
        return Err(ParseError::EmptySequence);
    }
    Ok(vec![seq.with_annotations(annotations)])
}

/// Decode the embedded `<Features>` XML table. Each feature may carry any
/// number of disjoint segments; the annotation spans min-start to max-end
/// across them, and a feature with no parseable segments collapses to
/// `(0, 0)`.
fn parse_feature_block(block: &[u8]) -> Result<Vec<Annotation>, ParseError> {
    let text = String::from_utf8_lossy(block);
    let doc = xml::parse_document(&text)?;

    let mut annotations = Vec::new();
    for feature in doc.children_named("Feature") {
        let mut span: Option<(usize, usize)> = None;
        for segment in feature.children_named("Segment") {
            let Some((a, b)) = segment
                .attr("range")
                .and_then(|range| range.split_once('-'))
                .and_then(|(a, b)| Some((a.trim().parse().ok()?, b.trim().parse().ok()?)))
            else {
                continue;
            };
            span = Some(match span {
                Some((min, max)) => (min.min(a), max.max(b)),
                None => (a, b),
            });
        }
        let (start, end) = match span {
            Some((min, max)) => (min.saturating_sub(1), max),
            None => (0, 0),
        };

        annotations.push(Annotation {
            name: feature.attr("name").unwrap_or("").to_string(),
            start,
            end,
            direction: directionality(feature.attr("directionality")),
            color: None,
            kind: feature.attr("type").map(str::to_string),
        });
    }
    Ok(annotations)
}

/// SnapGene directionality codes: 1 forward, 2 reverse, 0/3/absent none.
fn directionality(code: Option<&str>) -> Direction {
    match code {
        Some("1") => Direction::Forward,
        Some("2") => Direction::Reverse,
        _ => Direction::None,
    }
}
