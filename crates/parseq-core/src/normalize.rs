use crate::codon::amino_acid_alphabet;
use crate::seq::{Direction, SeqType};

/// IUPAC base pairings, case preserved. Characters absent from this table
/// are dropped during cleaning. U complements to A but A complements back
/// to T, so the table is involutive only over the DNA alphabet.
const COMPLEMENT_PAIRS: &[(char, char)] = &[
    ('A', 'T'),
    ('B', 'V'),
    ('C', 'G'),
    ('D', 'H'),
    ('G', 'C'),
    ('H', 'D'),
    ('K', 'M'),
    ('M', 'K'),
    ('N', 'N'),
    ('R', 'Y'),
    ('S', 'S'),
    ('T', 'A'),
    ('U', 'A'),
    ('V', 'B'),
    ('W', 'W'),
    ('X', 'X'),
    ('Y', 'R'),
    ('a', 't'),
    ('b', 'v'),
    ('c', 'g'),
    ('d', 'h'),
    ('g', 'c'),
    ('h', 'd'),
    ('k', 'm'),
    ('m', 'k'),
    ('n', 'n'),
    ('r', 'y'),
    ('s', 's'),
    ('t', 'a'),
    ('u', 'a'),
    ('v', 'b'),
    ('w', 'w'),
    ('x', 'x'),
    ('y', 'r'),
];

/// Strand tokens accepted as forward. Membership is case-sensitive.
const FORWARD_TOKENS: &[&str] = &[
    "FWD", "fwd", "FORWARD", "forward", "FOR", "for", "TOP", "top", "1",
];

/// Strand tokens accepted as reverse.
const REVERSE_TOKENS: &[&str] = &["REV", "rev", "REVERSE", "reverse", "BOTTOM", "bottom", "-1"];

/// Complement a single base, or None for characters outside the table.
pub fn complement_base(base: char) -> Option<char> {
    COMPLEMENT_PAIRS
        .iter()
        .find(|(b, _)| *b == base)
        .map(|(_, c)| *c)
}

/// Filter a raw sequence down to the IUPAC alphabet, building the kept
/// sequence and its complement in lockstep. Unrecognized characters are
/// dropped from both strands; empty input yields two empty strings.
pub fn clean_and_complement(raw: &str) -> (String, String) {
    let mut seq = String::with_capacity(raw.len());
    let mut comp = String::with_capacity(raw.len());
    for c in raw.chars() {
        if let Some(paired) = complement_base(c) {
            seq.push(c);
            comp.push(paired);
        }
    }
    (seq, comp)
}

/// Reverse complement of a raw sequence (cleaned first).
pub fn reverse_complement(raw: &str) -> String {
    let (_, comp) = clean_and_complement(raw);
    comp.chars().rev().collect()
}

/// Infer the molecule type from sequence content. DNA is checked before
/// RNA, RNA before protein; anything else is unknown, as is empty input.
pub fn guess_type(seq: &str) -> SeqType {
    if seq.is_empty() {
        return SeqType::Unknown;
    }
    if seq
        .chars()
        .all(|c| matches!(c.to_ascii_uppercase(), 'A' | 'T' | 'G' | 'C' | 'N' | '.'))
    {
        SeqType::Dna
    } else if seq
        .chars()
        .all(|c| matches!(c.to_ascii_uppercase(), 'A' | 'U' | 'G' | 'C' | 'N' | '.'))
    {
        SeqType::Rna
    } else if seq
        .chars()
        .all(|c| amino_acid_alphabet().contains(c.to_ascii_uppercase()))
    {
        SeqType::Aa
    } else {
        SeqType::Unknown
    }
}

/// Map a free-text strand token to a direction. Matching is case-sensitive
/// set membership; unrecognized tokens are directionless. Numeric strand
/// values go through [`Direction::from_i8`] instead.
pub fn parse_direction(token: &str) -> Direction {
    if FORWARD_TOKENS.contains(&token) {
        Direction::Forward
    } else if REVERSE_TOKENS.contains(&token) {
        Direction::Reverse
    } else {
        Direction::None
    }
}
