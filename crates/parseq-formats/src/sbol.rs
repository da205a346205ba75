//! SBOL version dispatch: the detector only decides "this is RDF"; the
//! namespace token picks the sub-parser.

use parseq_core::Seq;

use crate::{sbol_v1, sbol_v2, ParseError};

const V1_NAMESPACE: &str = "sbols.org/v1#";

pub fn parse(content: &str, file_name: &str) -> Result<Vec<Seq>, ParseError> {
    if content.contains(V1_NAMESPACE) {
        sbol_v1::parse(content)
    } else {
        sbol_v2::parse(content, file_name)
    }
}
