//! Last-resort parser for unlabeled raw DNA text: one annotation-free
//! sequence, named later by the assembler from the file name.

use parseq_core::Seq;

use crate::ParseError;

pub fn parse(content: &str) -> Result<Vec<Seq>, ParseError> {
    let seq = Seq::new("", content);
    if seq.is_empty() {
        return Err(ParseError::EmptySequence);
    }
    Ok(vec![seq])
}

#[cfg(test)]
mod tests {
    use parseq_core::SeqType;

    use super::*;

    #[test]
    fn test_synthesizes_one_sequence() {
        let seqs = parse("atcg atcg\nATCG\n").unwrap();
        assert_eq!(seqs.len(), 1);
        assert_eq!(seqs[0].seq, "atcgatcgATCG");
        assert_eq!(seqs[0].seq_type, SeqType::Dna);
        assert!(seqs[0].annotations.is_empty());
    }

    #[test]
    fn test_nothing_left_after_cleaning_is_an_error() {
        assert!(matches!(parse("123 456"), Err(ParseError::EmptySequence)));
    }
}
