pub mod parser;
pub mod predictor;

pub use parser::{parse_line, parse_lines, ParseError, ParsedBatch};
pub use predictor::predict_fold;
