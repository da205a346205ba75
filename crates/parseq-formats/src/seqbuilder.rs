//! SeqBuilder `.sbd` exports. The body is a GenBank-shaped record (the
//! "Written by SeqBuilder" marker lives in a comment), so this delegates
//! to the GenBank grammar.

use parseq_core::Seq;

use crate::{genbank, ParseError};

pub fn parse(content: &str) -> Result<Vec<Seq>, ParseError> {
    if !content.contains("LOCUS") || !content.contains("ORIGIN") {
        return Err(ParseError::malformed(
            "seqbuilder",
            "no GenBank-shaped record body found",
        ));
    }
    genbank::parse(content)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_delegates_to_genbank() {
        let input = "LOCUS  clone1  8 bp\nCOMMENT  Written by SeqBuilder\nORIGIN\n        1 atcgatcg\n//\n";
        let seqs = parse(input).unwrap();
        assert_eq!(seqs[0].name, "clone1");
        assert_eq!(seqs[0].seq, "atcgatcg");
    }

    #[test]
    fn test_non_genbank_body_is_an_error() {
        let err = parse("Written by SeqBuilder\nbut nothing else").unwrap_err();
        assert!(matches!(
            err,
            ParseError::MalformedInput {
                format: "seqbuilder",
                ..
            }
        ));
    }
}
