mod decoder;
mod extractor;
mod normalizer;

pub use decoder::{decode_fragment, decode_repaired, decode_strict, DecodePath, Decoded};
pub use extractor::{extract_fragments, RawFragment};
pub use normalizer::{normalize_into, question_set, NormalizeReport};
