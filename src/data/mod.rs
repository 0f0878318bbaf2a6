pub mod reader;
pub mod splits;
pub mod writer;

pub use reader::samples_from_csv;
pub use splits::{create_splits, load_eval_splits, load_splits, Fold, KFold};
pub use writer::save_samples_to_csv;

use serde::{Deserialize, Serialize};

/// One unit of survey text plus its human (or predicted) coding.
///
/// An empty string means the field is absent; the source tables leave label
/// cells blank rather than carrying a sentinel. `multiple_themes` holds a
/// newline-delimited list of theme/subtheme tags when a sample was coded with
/// more than one.
#[derive(Clone, Debug, Default, Deserialize, PartialEq, Serialize)]
pub struct Sample {
    #[serde(rename = "Text", default)]
    pub text: String,
    #[serde(rename = "Main theme", default)]
    pub main_theme: String,
    #[serde(rename = "Subtheme", default)]
    pub subtheme: String,
    #[serde(rename = "Confidence level", default)]
    pub confidence: String,
    #[serde(rename = "Multiple themes", default)]
    pub multiple_themes: String,
    #[serde(rename = "Comments", default)]
    pub comments: String,
}

impl Sample {
    pub fn new<S: Into<String>>(text: S) -> Self {
        Self {
            text: text.into(),
            ..Default::default()
        }
    }

    /// Column-name/value pairs in table order.
    pub fn fields(&self) -> [(&'static str, &str); 6] {
        [
            ("Text", &self.text),
            ("Main theme", &self.main_theme),
            ("Subtheme", &self.subtheme),
            ("Confidence level", &self.confidence),
            ("Multiple themes", &self.multiple_themes),
            ("Comments", &self.comments),
        ]
    }

    /// The same row with every label field cleared; only the text survives.
    pub fn strip_labels(&self) -> Self {
        Self::new(self.text.clone())
    }

    pub fn is_labelled(&self) -> bool {
        !self.main_theme.is_empty() || !self.multiple_themes.is_empty()
    }
}
