pub mod codon;
pub mod normalize;
pub mod seq;

pub use normalize::*;
pub use seq::*;
