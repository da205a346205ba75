//! End-to-end tests: raw file content through detection, parsing, and
//! assembly into the canonical shape.

use std::io::Write;

use pretty_assertions::assert_eq;

use parseq_core::{Direction, SeqType};
use parseq_formats::{parse, parse_bytes, parse_many, Input, ParseError, ParseOptions};

const PTEST_GB: &str = include_str!("fixtures/pTest.gb");
const TWO_RECORDS_FASTA: &str = include_str!("fixtures/two_records.fasta");
const BIOBRICK_PART: &str = include_str!("fixtures/biobrick_part.xml");
const JBEI_RECORD: &str = include_str!("fixtures/jbei_record.xml");
const SBOL_V1: &str = include_str!("fixtures/sbol_v1.xml");
const SBOL_V2: &str = include_str!("fixtures/sbol_v2.xml");
const BENCHLING: &str = include_str!("fixtures/benchling.json");

fn assert_sorted(seqs: &[parseq_core::Seq]) {
    for seq in seqs {
        for pair in seq.annotations.windows(2) {
            assert!(
                (pair[0].start, pair[0].end) <= (pair[1].start, pair[1].end),
                "annotations out of order in {}",
                seq.name
            );
        }
    }
}

#[test]
fn two_record_fasta() {
    let seqs = parse(TWO_RECORDS_FASTA, &ParseOptions::default()).unwrap();
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
fn genbank_plasmid() {
    let seqs = parse(PTEST_GB, &ParseOptions::with_file_name("pTest.gb")).unwrap();
    assert_eq!(seqs.len(), 1);
    let seq = &seqs[0];
    assert_eq!(seq.name, "pTest");
    assert_eq!(seq.seq.len(), 120);
    assert_eq!(seq.seq_type, SeqType::Dna);
    assert_eq!(seq.annotations.len(), 4);
    assert_sorted(&seqs);

    // source has no name qualifier, so the assembler titles it
    assert_eq!(seq.annotations[0].name, "Untitled");
    assert_eq!(seq.annotations[0].kind.as_deref(), Some("source"));

    let promoter = &seq.annotations[1];
    assert_eq!(promoter.name, "J23100 promoter");
    assert_eq!((promoter.start, promoter.end), (4, 40));
    assert_eq!(promoter.color.as_deref(), Some("#ff9900"));

    let single = &seq.annotations[2];
    assert_eq!(single.end - single.start, 1);

    let cds = &seq.annotations[3];
    assert_eq!(cds.name, "rfp");
    assert_eq!(cds.direction, Direction::Reverse);
}

#[test]
fn biobrick_part() {
    let seqs = parse(BIOBRICK_PART, &ParseOptions::default()).unwrap();
    assert_eq!(seqs[0].name, "BBa_B0034");
    assert_eq!(seqs[0].seq, "aaagaggagaaa");
    let annotation = &seqs[0].annotations[0];
    assert_eq!(annotation.name, "forward-1");
    assert_eq!((annotation.start, annotation.end), (0, 12));
    assert_eq!(annotation.direction, Direction::Forward);
}

#[test]
fn jbei_record() {
    let seqs = parse(JBEI_RECORD, &ParseOptions::default()).unwrap();
    assert_eq!(seqs[0].name, "pJBEI_demo");
    assert_eq!(seqs[0].annotations.len(), 2);
    // genbankStart=1 normalizes to 0
    assert_eq!(seqs[0].annotations[0].start, 0);
    assert_eq!(seqs[0].annotations[1].direction, Direction::Reverse);
    assert_sorted(&seqs);
}

#[test]
fn sbol_v1_collection() {
    let seqs = parse(SBOL_V1, &ParseOptions::default()).unwrap();
    assert_eq!(seqs[0].name, "Demo Component");
    assert_eq!(seqs[0].seq, "atgcatgcatgcatgcatgc");
    let annotation = &seqs[0].annotations[0];
    assert_eq!(annotation.name, "sub_part");
    assert_eq!((annotation.start, annotation.end), (2, 9));
    assert_eq!(annotation.direction, Direction::Forward);
}

#[test]
fn sbol_v2_component() {
    let seqs = parse(SBOL_V2, &ParseOptions::default()).unwrap();
    assert_eq!(seqs[0].name, "demo_device");
    let annotation = &seqs[0].annotations[0];
    assert_eq!(annotation.name, "promoter_region");
    // Range 1..11 (1-based inclusive) lands on canonical (0, 11)
    assert_eq!((annotation.start, annotation.end), (0, 11));
}

#[test]
fn benchling_construct() {
    let seqs = parse(BENCHLING, &ParseOptions::default()).unwrap();
    assert_eq!(seqs[0].name, "pBenchDemo");
    assert_eq!(seqs[0].annotations.len(), 2);
    assert_sorted(&seqs);
    // Sorted promoter-first even though the source lists it second
    assert_eq!(seqs[0].annotations[0].name, "promoter");
}

#[test]
fn raw_dna_named_from_file() {
    let seqs = parse(
        "atcgatcgatcgATCG",
        &ParseOptions::with_file_name("scratch.txt"),
    )
    .unwrap();
    assert_eq!(seqs[0].name, "scratch");
    assert_eq!(seqs[0].seq, "atcgatcgatcgATCG");
    assert!(seqs[0].annotations.is_empty());
}

#[test]
fn empty_input_never_yields_an_empty_list() {
    let err = parse("", &ParseOptions::default()).unwrap_err();
    assert!(err.to_string().contains("cannot parse null or empty string"));
}

#[test]
fn dna_extension_with_wrong_magic() {
    let err = parse_bytes(
        b"this is not a snapgene container",
        &ParseOptions::with_file_name("construct.dna"),
    )
    .unwrap_err();
    match err {
        ParseError::MalformedInput { format, reason } => {
            assert_eq!(format, "snapgene");
            assert!(reason.contains("length") || reason.contains("title"), "{reason}");
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn batch_over_files_preserves_order() {
    let dir = tempfile::tempdir().unwrap();
    let gb_path = dir.path().join("pTest.gb");
    std::fs::File::create(&gb_path)
        .unwrap()
        .write_all(PTEST_GB.as_bytes())
        .unwrap();
    let fasta_path = dir.path().join("two_records.fasta");
    std::fs::File::create(&fasta_path)
        .unwrap()
        .write_all(TWO_RECORDS_FASTA.as_bytes())
        .unwrap();

    let seqs = parse_many(&[
        Input::Path(gb_path),
        Input::Path(fasta_path),
        Input::Content(BENCHLING.to_string()),
    ])
    .unwrap();
    let names: Vec<&str> = seqs.iter().map(|s| s.name.as_str()).collect();
    assert_eq!(names, ["pTest", "Sequence_1", "Sequence_2", "pBenchDemo"]);
}

#[test]
fn batch_rejects_zip_without_parsing_anything() {
    let dir = tempfile::tempdir().unwrap();
    let zip_path = dir.path().join("bundle.zip");
    std::fs::write(&zip_path, b"PK\x03\x04").unwrap();

    let err = parse_many(&[
        Input::Content(TWO_RECORDS_FASTA.to_string()),
        Input::Path(zip_path.clone()),
    ])
    .unwrap_err();
    match err {
        ParseError::UnsupportedContainer(path) => {
            assert!(path.ends_with("bundle.zip"));
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn batch_fails_fast_on_bad_item() {
    let err = parse_many(&[
        Input::Content(TWO_RECORDS_FASTA.to_string()),
        Input::Content("%%% unparseable %%%".to_string()),
    ])
    .unwrap_err();
    assert!(matches!(err, ParseError::UnrecognizedFormat { .. }));
}
