use crate::data::Sample;
use std::sync::LazyLock;

#[derive(Debug, thiserror::Error)]
pub enum ParseError {
    #[error("line is empty")]
    Empty,

    #[error("line is not a well-formed record: {reason}")]
    Malformed { reason: String },
}

/// The model sometimes echoes `nan` for a column it has no value for, bare or
/// quoted either way. Those cells mean "absent" and read back as empty.
static NAN_TOKEN: LazyLock<regex::Regex> = LazyLock::new(|| {
    regex::Regex::new(r#":\s*(?:nan|'nan'|"nan")\s*([,}])"#).expect("static regex compiles")
});

static POSSESSIVE: LazyLock<regex::Regex> =
    LazyLock::new(|| regex::Regex::new(r"([A-Za-z])'(s)").expect("static regex compiles"));

/// Parse one line of model output into a prediction record.
///
/// The expected shape is the single-line JSON record the prompt's worked
/// examples use. A model drifting toward single-quoted records is still
/// accepted: quotes are normalized with possessive apostrophes (`…'s`)
/// protected so they do not read as closing delimiters.
pub fn parse_line(line: &str) -> Result<Sample, ParseError> {
    let line = line.trim();
    if line.is_empty() {
        return Err(ParseError::Empty);
    }

    let normalized = NAN_TOKEN.replace_all(line, r#": ""$1"#);
    match serde_json::from_str::<Sample>(&normalized) {
        Ok(sample) => Ok(sample),
        Err(json_err) => serde_json::from_str::<Sample>(&requote(&normalized)).map_err(|_| {
            ParseError::Malformed {
                reason: json_err.to_string(),
            }
        }),
    }
}

fn requote(line: &str) -> String {
    let protected = POSSESSIVE.replace_all(line, "$1\u{1}$2");
    let double_quoted = protected.replace('\'', "\"");
    double_quoted.replace('\u{1}', "'")
}

/// The records that parsed plus how many lines did not.
///
/// Skips are counted instead of hidden so callers can decide whether a high
/// skip rate should abort the run; the pipeline itself only warns.
#[derive(Debug, Default)]
pub struct ParsedBatch {
    pub records: Vec<Sample>,
    pub empty: usize,
    pub malformed: usize,
}

impl ParsedBatch {
    pub fn skipped(&self) -> usize {
        self.empty + self.malformed
    }

    pub fn skip_rate(&self, total_lines: usize) -> f64 {
        if total_lines == 0 {
            0.0
        } else {
            self.skipped() as f64 / total_lines as f64
        }
    }
}

pub fn parse_lines(lines: &[String]) -> ParsedBatch {
    let mut parsed = ParsedBatch::default();
    for line in lines {
        match parse_line(line) {
            Ok(record) => parsed.records.push(record),
            Err(ParseError::Empty) => parsed.empty += 1,
            Err(ParseError::Malformed { reason }) => {
                crate::debug!("skipping malformed response line: {reason}: {line}");
                parsed.malformed += 1;
            }
        }
    }
    parsed
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::prompt::record_line;

    #[test]
    fn round_trips_a_fully_populated_record() {
        let sample = Sample {
            text: "The lectures were too fast.".to_string(),
            main_theme: "2".to_string(),
            subtheme: "2.3".to_string(),
            confidence: "High".to_string(),
            multiple_themes: "2\n2.3".to_string(),
            comments: "clear case".to_string(),
        };

        let parsed = parse_line(&record_line(&sample)).unwrap();
        assert_eq!(parsed, sample);
    }

    #[test]
    fn nan_tokens_read_back_as_empty() {
        for line in [
            r#"{"Text": "abc", "Main theme": nan, "Subtheme": "1.2"}"#,
            r#"{"Text": "abc", "Main theme": 'nan', "Subtheme": "1.2"}"#,
            r#"{"Text": "abc", "Main theme": "nan", "Subtheme": "1.2"}"#,
        ] {
            let parsed = parse_line(line).unwrap();
            assert_eq!(parsed.main_theme, "");
            assert_eq!(parsed.subtheme, "1.2");
        }
    }

    #[test]
    fn nan_as_the_last_field_reads_back_as_empty() {
        let parsed = parse_line(r#"{"Text": "abc", "Comments": nan}"#).unwrap();
        assert_eq!(parsed.comments, "");
    }

    #[test]
    fn accepts_single_quoted_records_with_possessives() {
        let line = r#"{'Text': 'The teacher's feedback helped.', 'Main theme': '4'}"#;
        let parsed = parse_line(line).unwrap();
        assert_eq!(parsed.text, "The teacher's feedback helped.");
        assert_eq!(parsed.main_theme, "4");
    }

    #[test]
    fn empty_and_malformed_lines_are_distinct_errors() {
        assert!(matches!(parse_line("   "), Err(ParseError::Empty)));
        assert!(matches!(
            parse_line("I cannot code this sentence."),
            Err(ParseError::Malformed { .. })
        ));
    }

    #[test]
    fn parse_lines_counts_what_it_skips() {
        let lines = vec![
            r#"{"Text": "one", "Main theme": "1"}"#.to_string(),
            "".to_string(),
            "not a record".to_string(),
            r#"{"Text": "two", "Main theme": "2"}"#.to_string(),
        ];

        let parsed = parse_lines(&lines);
        assert_eq!(parsed.records.len(), 2);
        assert_eq!(parsed.empty, 1);
        assert_eq!(parsed.malformed, 1);
        assert_eq!(parsed.skipped(), 2);
        assert!((parsed.skip_rate(lines.len()) - 0.5).abs() < f64::EPSILON);
    }

    #[test]
    fn skip_rate_of_nothing_is_zero() {
        let parsed = parse_lines(&[]);
        assert_eq!(parsed.skip_rate(0), 0.0);
    }
}
