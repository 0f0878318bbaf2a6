use crate::data::Sample;
use std::path::Path;

/// Delimiter between the worked examples and the uncoded batch. The model is
/// told to continue the coding in the same record format.
const INSTRUCTION_BLOCK: &str = "\n################################\n\nPlease do the same for the following sentences and complete the coding.\n\n################################\n\n";

/// The static prompt text loaded from disk. The file name may carry a
/// prompt-version suffix so different wordings can be compared across runs.
#[derive(Clone, Debug)]
pub struct PromptTemplate {
    pub text: String,
}

impl PromptTemplate {
    pub fn load<P: AsRef<Path>>(path: P) -> crate::Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)
            .map_err(|e| crate::anyhow!("failed to read prompt template {}: {e}", path.display()))?;
        Ok(Self { text })
    }

    pub fn from_text<S: Into<String>>(text: S) -> Self {
        Self { text: text.into() }
    }

    /// Template text, the first `example_rows` labelled records one per line,
    /// then the instruction block. The header is rebuilt and resent with
    /// every batch; no session state is carried between requests.
    pub fn build_header(&self, train: &[Sample], example_rows: usize) -> String {
        let mut header = self.text.clone();
        for sample in train.iter().take(example_rows) {
            header.push_str(&record_line(sample));
            header.push('\n');
        }
        header.push_str(INSTRUCTION_BLOCK);
        header
    }
}

/// One sample as a single-line JSON record keyed by the table's column names.
/// Every column appears, empty or not: the worked examples show the model the
/// full schema it is expected to echo back.
pub fn record_line(sample: &Sample) -> String {
    let fields: Vec<String> = sample
        .fields()
        .iter()
        .map(|(column, value)| format!("{}: {}", json_string(column), json_string(value)))
        .collect();
    format!("{{{}}}", fields.join(", "))
}

/// Unlabelled rows drop empty fields entirely; blank key-value pairs are
/// prompt noise the model pays tokens for.
pub fn sparse_record_line(sample: &Sample) -> String {
    let fields: Vec<String> = sample
        .fields()
        .iter()
        .filter(|(_, value)| !value.is_empty())
        .map(|(column, value)| format!("{}: {}", json_string(column), json_string(value)))
        .collect();
    format!("{{{}}}", fields.join(", "))
}

/// One batch of uncoded rows, one sparse record per line.
pub fn batch_body(rows: &[Sample]) -> String {
    let mut body = String::new();
    for row in rows {
        body.push_str(&sparse_record_line(row));
        body.push('\n');
    }
    body
}

fn json_string(value: &str) -> String {
    serde_json::Value::String(value.to_string()).to_string()
}
