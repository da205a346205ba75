use parseq_core::Seq;

use crate::ParseError;

/// Parse FASTA content into one or more sequences. Every `>` or `;` header
/// line starts a new record; the record name is the full header text after
/// the sentinel. Records that clean down to nothing are dropped.
pub fn parse(input: &str) -> Result<Vec<Seq>, ParseError> {
    let mut seqs = Vec::new();
    let mut name: Option<String> = None;
    let mut body = String::new();

    for line in input.lines() {
        let trimmed = line.trim();
        if trimmed.starts_with('>') || trimmed.starts_with(';') {
            flush(&mut seqs, name.take(), &mut body);
            name = Some(trimmed[1..].trim().to_string());
        } else {
            body.push_str(trimmed);
        }
    }
    flush(&mut seqs, name, &mut body);

    if seqs.is_empty() {
        return Err(ParseError::malformed("fasta", "no sequence records found"));
    }
    Ok(seqs)
}

fn flush(seqs: &mut Vec<Seq>, name: Option<String>, body: &mut String) {
    let Some(name) = name else {
        body.clear();
        return;
    };
    let seq = Seq::new(name, body);
    body.clear();
    if !seq.is_empty() {
        seqs.push(seq);
    }
}

#[cfg(test)]
mod tests {
    use parseq_core::SeqType;
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_parse_two_records() {
        let input = ">Sequence_1\nACTGCCCCCCCCC\n>Sequence_2\nGTCAgggggggggg\n";
        let seqs = parse(input).unwrap();
        assert_eq!(seqs.len(), 2);
        assert_eq!(seqs[0].name, "Sequence_1");
        assert_eq!(seqs[0].seq, "ACTGCCCCCCCCC");
        assert_eq!(seqs[1].name, "Sequence_2");
        assert_eq!(seqs[1].seq, "GTCAgggggggggg");
        for seq in &seqs {
            assert_eq!(seq.seq_type, SeqType::Dna);
            assert!(seq.annotations.is_empty());
        }
    }

    #[test]
    fn test_header_keeps_full_text() {
        let seqs = parse(">seq1 synthetic promoter region\nATCG\n").unwrap();
        assert_eq!(seqs[0].name, "seq1 synthetic promoter region");
    }

    #[test]
    fn test_semicolon_headers() {
        let seqs = parse(";old1\nATCG\n;old2\nGGCC\n").unwrap();
        assert_eq!(seqs.len(), 2);
        assert_eq!(seqs[0].name, "old1");
    }

    #[test]
    fn test_multiline_body_joined_and_cleaned() {
        let seqs = parse(">s\nATCG atcg\n1234\nGGCC\n").unwrap();
        assert_eq!(seqs[0].seq, "ATCGatcgGGCC");
    }

    #[test]
    fn test_empty_records_dropped() {
        let seqs = parse(">empty\n\n>full\nATCG\n").unwrap();
        assert_eq!(seqs.len(), 1);
        assert_eq!(seqs[0].name, "full");
    }

    #[test]
    fn test_no_records_is_an_error() {
        assert!(parse("").is_err());
        assert!(parse("> \n").is_err());
    }

    #[test]
    fn test_protein_record() {
        // Amino-acid symbols that are also IUPAC nucleotide codes survive
        // cleaning; the type check then falls through DNA and RNA to AA.
        let seqs = parse(">prot\nKNTRSW\n").unwrap();
        assert_eq!(seqs[0].seq, "KNTRSW");
        assert_eq!(seqs[0].seq_type, SeqType::Aa);
    }
}
