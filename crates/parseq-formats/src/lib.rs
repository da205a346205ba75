pub mod assemble;
pub mod benchling;
pub mod biobrick;
pub mod detect;
pub mod fasta;
pub mod genbank;
pub mod jbei;
pub mod raw;
pub mod sbol;
pub mod sbol_v1;
pub mod sbol_v2;
pub mod seqbuilder;
pub mod snapgene;
pub mod xml;

use std::path::PathBuf;

use rayon::prelude::*;
use thiserror::Error;

use parseq_core::Seq;

use crate::detect::FileFormat;

/// How many characters of the offending content an
/// [`ParseError::UnrecognizedFormat`] carries.
const EXCERPT_LEN: usize = 200;

#[derive(Debug, Error)]
pub enum ParseError {
    #[error("unrecognized format for \"{file_name}\": {excerpt:?}")]
    UnrecognizedFormat { file_name: String, excerpt: String },
    #[error("malformed {format} input: {reason}")]
    MalformedInput { format: &'static str, reason: String },
    #[error("sequence is empty after cleaning")]
    EmptySequence,
    #[error("unsupported container: {0}")]
    UnsupportedContainer(String),
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

impl ParseError {
    pub(crate) fn malformed(format: &'static str, reason: impl Into<String>) -> Self {
        ParseError::MalformedInput {
            format,
            reason: reason.into(),
        }
    }
}

/// Hints accompanying a parse call. `file_name` feeds both format detection
/// and name defaulting; `source` carries the raw byte buffer that the
/// SnapGene parser needs when the text content was lossily decoded.
#[derive(Debug, Clone, Default)]
pub struct ParseOptions {
    pub file_name: Option<String>,
    pub source: Option<Vec<u8>>,
}

impl ParseOptions {
    pub fn with_file_name(file_name: impl Into<String>) -> Self {
        Self {
            file_name: Some(file_name.into()),
            source: None,
        }
    }
}

/// One item of a batch: literal content or a path to read.
#[derive(Debug, Clone)]
pub enum Input {
    Content(String),
    Path(PathBuf),
}

/// Parse one input into canonical sequences: detect the format, run the
/// matching parser, and canonicalize the result. Terminal errors carry no
/// partial records.
pub fn parse(content: &str, options: &ParseOptions) -> Result<Vec<Seq>, ParseError> {
    let file_name = options.file_name.as_deref().unwrap_or("Unknown");
    if content.trim().is_empty() && options.source.is_none() {
        return Err(ParseError::malformed(
            "input",
            "cannot parse null or empty string",
        ));
    }

    let format = detect::detect_format(content, file_name).ok_or_else(|| {
        ParseError::UnrecognizedFormat {
            file_name: file_name.to_string(),
            excerpt: content.chars().take(EXCERPT_LEN).collect(),
        }
    })?;

    let seqs = match format {
        FileFormat::Jbei => jbei::parse(content)?,
        FileFormat::Fasta => fasta::parse(content)?,
        FileFormat::GenBank => genbank::parse(content)?,
        FileFormat::SnapGene => {
            let bytes = options.source.as_deref().ok_or_else(|| {
                ParseError::malformed(
                    "snapgene",
                    "a .dna file needs its raw byte buffer, not decoded text",
                )
            })?;
            snapgene::parse(bytes)?
        }
        FileFormat::SeqBuilder => seqbuilder::parse(content)?,
        FileFormat::BioBrick => biobrick::parse(content)?,
        FileFormat::Benchling => benchling::parse(content)?,
        FileFormat::Sbol => sbol::parse(content, file_name)?,
        FileFormat::RawDna => raw::parse(content)?,
    };

    Ok(assemble::finalize(seqs, file_name))
}

/// Parse byte input. A `.dna` file name routes directly to the SnapGene
/// binary parser; anything else is decoded lossily and re-enters [`parse`]
/// with the original buffer kept alongside.
pub fn parse_bytes(bytes: &[u8], options: &ParseOptions) -> Result<Vec<Seq>, ParseError> {
    let file_name = options.file_name.clone().unwrap_or_else(|| "Unknown".to_string());
    if file_name.to_lowercase().ends_with(".dna") {
        let seqs = snapgene::parse(bytes)?;
        return Ok(assemble::finalize(seqs, &file_name));
    }
    let text = String::from_utf8_lossy(bytes);
    parse(
        &text,
        &ParseOptions {
            file_name: Some(file_name),
            source: Some(bytes.to_vec()),
        },
    )
}

/// Parse a batch of inputs and concatenate the results in input order.
///
/// Container types that are out of scope (zip archives) fail the whole batch
/// up front, before any item is parsed. Items are independent, CPU-bound
/// work, so they fan out across the rayon pool; the first per-item error
/// aborts the batch.
pub fn parse_many(inputs: &[Input]) -> Result<Vec<Seq>, ParseError> {
    for input in inputs {
        if let Input::Path(path) = input {
            if path
                .extension()
                .is_some_and(|ext| ext.eq_ignore_ascii_case("zip"))
            {
                return Err(ParseError::UnsupportedContainer(
                    path.display().to_string(),
                ));
            }
        }
    }

    let groups: Vec<Vec<Seq>> = inputs
        .par_iter()
        .map(parse_input)
        .collect::<Result<_, _>>()?;
    Ok(groups.into_iter().flatten().collect())
}

fn parse_input(input: &Input) -> Result<Vec<Seq>, ParseError> {
    match input {
        Input::Content(text) => parse(text, &ParseOptions::default()),
        Input::Path(path) => {
            let file_name = path
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_else(|| "Unknown".to_string());
            let bytes = std::fs::read(path)?;
            parse_bytes(&bytes, &ParseOptions::with_file_name(file_name))
        }
    }
}
