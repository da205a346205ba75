//! Final canonicalization applied to every parser's output: name
//! defaulting and the annotation sort that makes ordering deterministic
//! regardless of source-format iteration order.

use parseq_core::Seq;

/// Fill missing names and sort annotations by `(start, end)` ascending.
/// The sort is stable, so equal-coordinate annotations keep source order.
pub fn finalize(mut seqs: Vec<Seq>, file_name: &str) -> Vec<Seq> {
    for seq in &mut seqs {
        if seq.name.trim().is_empty() {
            seq.name = name_from_file(file_name);
        }
        for annotation in &mut seq.annotations {
            if annotation.name.trim().is_empty() {
                annotation.name = "Untitled".to_string();
            }
        }
        seq.annotations.sort_by_key(|a| (a.start, a.end));
    }
    seqs
}

/// Default sequence name: the file name's basename up to the first dot,
/// or "Untitled" when there is nothing usable.
pub fn name_from_file(file_name: &str) -> String {
    let base = file_name
        .rsplit(['/', '\\'])
        .next()
        .unwrap_or(file_name);
    let stem = base.split('.').next().unwrap_or("").trim();
    if stem.is_empty() {
        "Untitled".to_string()
    } else {
        stem.to_string()
    }
}
