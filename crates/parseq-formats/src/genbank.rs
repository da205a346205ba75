//! GenBank flat-file parser: `LOCUS` for the record name, the `FEATURES`
//! table for annotations, `ORIGIN` for the sequence. Multi-record files
//! are split on `//` separators. All 1-based inclusive coordinates become
//! 0-based half-open on the way in.

use nom::{
    branch::alt,
    bytes::complete::tag,
    character::complete::{char, digit1, one_of, space0},
    combinator::{map, map_res, opt},
    multi::separated_list1,
    sequence::{delimited, pair, preceded, separated_pair},
    IResult,
};

use parseq_core::{Annotation, Direction, Seq};

use crate::ParseError;

/// Qualifier keys tried, in order, for an annotation's display name.
const NAME_QUALIFIERS: &[&str] = &["label", "gene", "product", "note"];

/// Qualifier keys tried, in order, for an annotation's color hint.
const COLOR_QUALIFIERS: &[&str] = &["ApEinfo_fwdcolor", "color"];

struct RawFeature {
    key: String,
    location: String,
    qualifiers: Vec<(String, String)>,
}

impl RawFeature {
    fn qualifier(&self, keys: &[&str]) -> Option<&str> {
        keys.iter().find_map(|key| {
            self.qualifiers
                .iter()
                .find(|(k, _)| k == key)
                .map(|(_, v)| v.as_str())
        })
    }
}

pub fn parse(input: &str) -> Result<Vec<Seq>, ParseError> {
    let mut seqs = Vec::new();
    for record in split_records(input) {
        if record.trim().is_empty() {
            continue;
        }
        seqs.push(parse_record(&record)?);
    }
    if seqs.is_empty() {
        return Err(ParseError::malformed("genbank", "no records found"));
    }
    Ok(seqs)
}

fn split_records(input: &str) -> Vec<String> {
    let mut records = Vec::new();
    let mut current = String::new();
    for line in input.lines() {
        if line.starts_with("//") {
            records.push(std::mem::take(&mut current));
        } else {
            current.push_str(line);
            current.push('\n');
        }
    }
    records.push(current);
    records
}

fn parse_record(record: &str) -> Result<Seq, ParseError> {
    let lines: Vec<&str> = record.lines().collect();
    let mut name = String::new();
    let mut raw_features: Vec<RawFeature> = Vec::new();
    let mut origin = String::new();

    let mut i = 0;
    while i < lines.len() {
        let line = lines[i];
        if line.starts_with("LOCUS") {
            name = line.split_whitespace().nth(1).unwrap_or("").to_string();
            i += 1;
        } else if line.starts_with("FEATURES") {
            i += 1;
            parse_features(&lines, &mut i, &mut raw_features);
        } else if line.starts_with("ORIGIN") {
            i += 1;
            while i < lines.len() {
                origin.extend(lines[i].chars().filter(char::is_ascii_alphabetic));
                i += 1;
            }
        } else {
            i += 1;
        }
    }

    let seq = Seq::new(name, &origin);
    if seq.is_empty() {
        return Err(ParseError::EmptySequence);
    }

    let annotations = raw_features
        .into_iter()
        .filter_map(|raw| {
            let (start, end, direction) = parse_location(&raw.location)?;
            Some(Annotation {
                name: raw.qualifier(NAME_QUALIFIERS).unwrap_or("").to_string(),
                start,
                end,
                direction,
                color: raw.qualifier(COLOR_QUALIFIERS).map(str::to_string),
                kind: Some(raw.key),
            })
        })
        .collect();
    Ok(seq.with_annotations(annotations))
}

/// Walk the FEATURES table. Feature keys sit at column 5 with the location
/// at column 21; continuation lines are indented at least 21 columns and
/// qualifier lines start with `/`.
fn parse_features(lines: &[&str], i: &mut usize, features: &mut Vec<RawFeature>) {
    while *i < lines.len() {
        let line = lines[*i];
        if line.trim().is_empty() {
            *i += 1;
            continue;
        }
        if !line.starts_with(' ') {
            break;
        }
        if indent_of(line) >= 21 {
            // Stray continuation with no open feature
            *i += 1;
            continue;
        }
        let body = line.trim_start();

        let mut parts = body.splitn(2, char::is_whitespace);
        let key = parts.next().unwrap_or("").to_string();
        let mut location = parts.next().unwrap_or("").trim().to_string();
        *i += 1;

        while *i < lines.len()
            && is_continuation(lines[*i])
            && !lines[*i].trim_start().starts_with('/')
        {
            location.push_str(lines[*i].trim());
            *i += 1;
        }

        let mut qualifiers = Vec::new();
        while *i < lines.len() && is_continuation(lines[*i]) {
            let body = lines[*i].trim();
            let Some(rest) = body.strip_prefix('/') else {
                *i += 1;
                continue;
            };
            let (qkey, mut qval) = match rest.split_once('=') {
                Some((key, value)) => (key.to_string(), value.to_string()),
                None => (rest.to_string(), String::new()),
            };
            *i += 1;
            while *i < lines.len()
                && is_continuation(lines[*i])
                && !lines[*i].trim_start().starts_with('/')
            {
                qval.push(' ');
                qval.push_str(lines[*i].trim());
                *i += 1;
            }
            qualifiers.push((qkey, qval.trim_matches('"').to_string()));
        }

        features.push(RawFeature {
            key,
            location,
            qualifiers,
        });
    }
}

fn indent_of(line: &str) -> usize {
    line.len() - line.trim_start().len()
}

fn is_continuation(line: &str) -> bool {
    !line.trim().is_empty() && indent_of(line) >= 21
}

/// Parse a feature location and flatten it to a single span. Joined and
/// ordered range lists collapse to min-start/max-end; `complement(..)`
/// marks the reverse strand; `<`/`>` partial bounds are tolerated. A bare
/// position `p` spans exactly one base: `(p-1, p)`.
fn parse_location(location: &str) -> Option<(usize, usize, Direction)> {
    let (_, (ranges, direction)) = location_expr(location.trim()).ok()?;
    let start = ranges.iter().map(|r| r.0).min()?;
    let end = ranges.iter().map(|r| r.1).max()?;
    Some((start.saturating_sub(1), end.max(start), direction))
}

fn number(input: &str) -> IResult<&str, usize> {
    map_res(digit1, str::parse)(input)
}

fn bound(input: &str) -> IResult<&str, usize> {
    preceded(opt(one_of("<>")), number)(input)
}

fn range(input: &str) -> IResult<&str, (usize, usize)> {
    alt((
        separated_pair(bound, tag(".."), bound),
        map(bound, |p| (p, p)),
    ))(input)
}

fn range_list(input: &str) -> IResult<&str, Vec<(usize, usize)>> {
    separated_list1(delimited(space0, char(','), space0), range)(input)
}

fn grouped_ranges(input: &str) -> IResult<&str, Vec<(usize, usize)>> {
    alt((
        delimited(
            pair(alt((tag("join"), tag("order"))), char('(')),
            range_list,
            char(')'),
        ),
        range_list,
    ))(input)
}

fn location_expr(input: &str) -> IResult<&str, (Vec<(usize, usize)>, Direction)> {
    alt((
        map(
            delimited(tag("complement("), grouped_ranges, char(')')),
            |ranges| (ranges, Direction::Reverse),
        ),
        map(grouped_ranges, |ranges| (ranges, Direction::Forward)),
    ))(input)
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    const MINI: &str = r##"LOCUS       pTest           100 bp    DNA     circular SYN 01-JAN-2026
DEFINITION  Test plasmid.
FEATURES             Location/Qualifiers
     promoter        1..20
                     /label="test promoter"
                     /ApEinfo_fwdcolor="#ff0000"
     CDS             complement(30..90)
                     /gene="gfp"
                     /codon_start=1
     misc_feature    42
ORIGIN
        1 atcgatcgat cgatcgatcg atcgatcgat cgatcgatcg atcgatcgat
       51 cgatcgatcg atcgatcgat cgatcgatcg atcgatcgat cgatcgatcg
//
"##;

    #[test]
    fn test_parse_mini_record() {
        let seqs = parse(MINI).unwrap();
        assert_eq!(seqs.len(), 1);
        let seq = &seqs[0];
        assert_eq!(seq.name, "pTest");
        assert_eq!(seq.seq.len(), 100);
        assert_eq!(seq.annotations.len(), 3);
    }

    #[test]
    fn test_feature_fields() {
        let seqs = parse(MINI).unwrap();
        let promoter = &seqs[0].annotations[0];
        assert_eq!(promoter.name, "test promoter");
        assert_eq!(promoter.kind.as_deref(), Some("promoter"));
        assert_eq!(promoter.color.as_deref(), Some("#ff0000"));
        assert_eq!((promoter.start, promoter.end), (0, 20));
        assert_eq!(promoter.direction, Direction::Forward);

        let cds = &seqs[0].annotations[1];
        assert_eq!(cds.name, "gfp");
        assert_eq!((cds.start, cds.end), (29, 90));
        assert_eq!(cds.direction, Direction::Reverse);
    }

    #[test]
    fn test_single_base_feature_spans_one() {
        let seqs = parse(MINI).unwrap();
        let single = &seqs[0].annotations[2];
        assert_eq!((single.start, single.end), (41, 42));
        assert_eq!(single.end - single.start, 1);
    }

    #[test]
    fn test_zero_annotations_is_valid() {
        let input = "LOCUS  bare  8 bp\nORIGIN\n        1 atcgatcg\n//\n";
        let seqs = parse(input).unwrap();
        assert_eq!(seqs[0].seq, "atcgatcg");
        assert!(seqs[0].annotations.is_empty());
    }

    #[test]
    fn test_multi_record() {
        let input = "LOCUS  one  4 bp\nORIGIN\n        1 atcg\n//\nLOCUS  two  4 bp\nORIGIN\n        1 ggcc\n//\n";
        let seqs = parse(input).unwrap();
        assert_eq!(seqs.len(), 2);
        assert_eq!(seqs[0].name, "one");
        assert_eq!(seqs[1].name, "two");
    }

    #[test]
    fn test_missing_origin_is_empty_sequence() {
        let input = "LOCUS  ghost  100 bp\nFEATURES             Location/Qualifiers\n//\n";
        assert!(matches!(parse(input), Err(ParseError::EmptySequence)));
    }

    #[test]
    fn test_location_simple() {
        assert_eq!(
            parse_location("100..200"),
            Some((99, 200, Direction::Forward))
        );
        assert_eq!(
            parse_location("<100..>200"),
            Some((99, 200, Direction::Forward))
        );
    }

    #[test]
    fn test_location_complement() {
        assert_eq!(
            parse_location("complement(100..200)"),
            Some((99, 200, Direction::Reverse))
        );
    }

    #[test]
    fn test_location_join_flattens() {
        assert_eq!(
            parse_location("join(100..200,300..400)"),
            Some((99, 400, Direction::Forward))
        );
        assert_eq!(
            parse_location("complement(join(10..20, 50..60))"),
            Some((9, 60, Direction::Reverse))
        );
        assert_eq!(
            parse_location("order(5..8,2..3)"),
            Some((1, 8, Direction::Forward))
        );
    }

    #[test]
    fn test_location_single_position() {
        assert_eq!(parse_location("42"), Some((41, 42, Direction::Forward)));
    }

    #[test]
    fn test_location_garbage_is_skipped() {
        assert_eq!(parse_location("unknown"), None);
    }
}
