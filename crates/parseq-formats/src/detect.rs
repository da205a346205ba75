//! Format detection: an ordered list of `(predicate, format)` rules where
//! the first match wins. The early rules key on structural markers; the two
//! tail rules (Benchling JSON sniff, raw-DNA first-line ratio) are
//! heuristics and must stay last.

use serde_json::Value;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileFormat {
    Jbei,
    Fasta,
    GenBank,
    SnapGene,
    SeqBuilder,
    BioBrick,
    Benchling,
    Sbol,
    RawDna,
}

type Predicate = fn(&str, &str) -> bool;

const RULES: &[(Predicate, FileFormat)] = &[
    (is_jbei, FileFormat::Jbei),
    (is_fasta, FileFormat::Fasta),
    (is_genbank, FileFormat::GenBank),
    (is_snapgene, FileFormat::SnapGene),
    (is_seqbuilder, FileFormat::SeqBuilder),
    (is_biobrick, FileFormat::BioBrick),
    (is_benchling, FileFormat::Benchling),
    (is_sbol, FileFormat::Sbol),
    (looks_like_raw_dna, FileFormat::RawDna),
];

/// Pick the parser for `(content, file_name)`, or `None` when no rule
/// matches. Never mutates the input; file-name suffix checks are
/// case-insensitive.
pub fn detect_format(content: &str, file_name: &str) -> Option<FileFormat> {
    let name = file_name.to_lowercase();
    RULES
        .iter()
        .find(|(matches, _)| matches(content, &name))
        .map(|(_, format)| *format)
}

fn has_extension(name: &str, extensions: &[&str]) -> bool {
    extensions
        .iter()
        .any(|ext| name.strip_suffix(ext).is_some_and(|stem| stem.ends_with('.')))
}

fn is_jbei(content: &str, _name: &str) -> bool {
    content.contains(":seq=\"http://jbei.org/sequence\"")
        || content.trim_start().starts_with("<seq:seq")
}

fn is_fasta(content: &str, name: &str) -> bool {
    let trimmed = content.trim_start();
    trimmed.starts_with('>')
        || trimmed.starts_with(';')
        || has_extension(name, &["seq", "fa", "fas", "fasta"])
}

fn is_genbank(content: &str, name: &str) -> bool {
    (content.contains("LOCUS") && content.contains("ORIGIN"))
        || has_extension(name, &["gb", "gbk", "genbank", "ape"])
}

fn is_snapgene(_content: &str, name: &str) -> bool {
    has_extension(name, &["dna"])
}

fn is_seqbuilder(content: &str, name: &str) -> bool {
    content.contains("Written by SeqBuilder") || has_extension(name, &["sbd"])
}

fn is_biobrick(content: &str, _name: &str) -> bool {
    content.contains("Parts from the iGEM") || content.contains("<part_list>")
}

fn is_benchling(content: &str, _name: &str) -> bool {
    sniff_benchling(content).is_some()
}

/// Speculative JSON parse used purely as a detection signal: returns the
/// decoded document only when it is an object carrying all three
/// Benchling-shaped keys. Parse failure disqualifies the branch, it is
/// never surfaced as an error.
pub fn sniff_benchling(content: &str) -> Option<Value> {
    let value: Value = serde_json::from_str(content).ok()?;
    let object = value.as_object()?;
    if ["bases", "annotations", "primers"]
        .iter()
        .all(|key| object.contains_key(*key))
    {
        Some(value)
    } else {
        None
    }
}

fn is_sbol(content: &str, _name: &str) -> bool {
    content.contains("RDF")
}

/// Last-resort heuristic: a first line that is more than 80% plain
/// `ATCG`/`atcg` characters is treated as unlabeled raw DNA.
fn looks_like_raw_dna(content: &str, _name: &str) -> bool {
    let first = content.lines().next().unwrap_or("").trim();
    if first.is_empty() {
        return false;
    }
    let dna = first
        .chars()
        .filter(|c| matches!(c, 'A' | 'T' | 'C' | 'G' | 'a' | 't' | 'c' | 'g'))
        .count();
    dna as f64 / first.chars().count() as f64 > 0.8
}
