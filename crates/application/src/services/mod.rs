pub mod answer_synthesizer;
pub mod negative_answer;

pub use answer_synthesizer::{synthesize, Synthesis};
pub use negative_answer::negative_soa;
