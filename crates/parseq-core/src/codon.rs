use std::sync::OnceLock;

/// Standard genetic code (NCBI table 1).
#[rustfmt::skip]
pub const CODON_TO_AA: &[(&str, char)] = &[
    ("TTT", 'F'), ("TTC", 'F'), ("TTA", 'L'), ("TTG", 'L'),
    ("CTT", 'L'), ("CTC", 'L'), ("CTA", 'L'), ("CTG", 'L'),
    ("ATT", 'I'), ("ATC", 'I'), ("ATA", 'I'), ("ATG", 'M'),
    ("GTT", 'V'), ("GTC", 'V'), ("GTA", 'V'), ("GTG", 'V'),
    ("TCT", 'S'), ("TCC", 'S'), ("TCA", 'S'), ("TCG", 'S'),
    ("CCT", 'P'), ("CCC", 'P'), ("CCA", 'P'), ("CCG", 'P'),
    ("ACT", 'T'), ("ACC", 'T'), ("ACA", 'T'), ("ACG", 'T'),
    ("GCT", 'A'), ("GCC", 'A'), ("GCA", 'A'), ("GCG", 'A'),
    ("TAT", 'Y'), ("TAC", 'Y'), ("TAA", '*'), ("TAG", '*'),
    ("CAT", 'H'), ("CAC", 'H'), ("CAA", 'Q'), ("CAG", 'Q'),
    ("AAT", 'N'), ("AAC", 'N'), ("AAA", 'K'), ("AAG", 'K'),
    ("GAT", 'D'), ("GAC", 'D'), ("GAA", 'E'), ("GAG", 'E'),
    ("TGT", 'C'), ("TGC", 'C'), ("TGA", '*'), ("TGG", 'W'),
    ("CGT", 'R'), ("CGC", 'R'), ("CGA", 'R'), ("CGG", 'R'),
    ("AGT", 'S'), ("AGC", 'S'), ("AGA", 'R'), ("AGG", 'R'),
    ("GGT", 'G'), ("GGC", 'G'), ("GGA", 'G'), ("GGG", 'G'),
];

/// The distinct amino-acid symbols the standard code can produce,
/// including the stop symbol. Derived from the codon table once per
/// process; used by type inference.
pub fn amino_acid_alphabet() -> &'static str {
    static ALPHABET: OnceLock<String> = OnceLock::new();
    ALPHABET.get_or_init(|| {
        let mut alphabet = String::new();
        for (_, aa) in CODON_TO_AA {
            if !alphabet.contains(*aa) {
                alphabet.push(*aa);
            }
        }
        alphabet
    })
}
