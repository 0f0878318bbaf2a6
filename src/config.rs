use crate::api::completion::DecodingConfig;
use std::path::{Path, PathBuf};

/// Everything one pipeline run needs to know: where the datasets and
/// artifacts live, which model codes them, and the fold/batch geometry.
///
/// `prompt_version` is a suffix appended to the template file name and to
/// every prediction artifact, so runs with different prompt wordings land
/// side by side instead of overwriting each other.
#[derive(Clone, Debug)]
pub struct PipelineConfig {
    pub data_dir: PathBuf,
    pub results_dir: PathBuf,
    pub labelled_dataset: String,
    pub unlabelled_dataset: String,
    pub splits_prefix: String,
    pub prompt_template: String,
    pub prompt_version: String,
    pub model_id: String,
    pub decoding: DecodingConfig,
    pub n_splits: usize,
    pub seed: u64,
    pub example_rows: usize,
    pub batch_rows: usize,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from("data"),
            results_dir: PathBuf::from("results"),
            labelled_dataset: "DS1-LabelledData.csv".to_string(),
            unlabelled_dataset: "DS2-UnlabelledData.csv".to_string(),
            splits_prefix: "dd".to_string(),
            prompt_template: "dd-gpt-prompt".to_string(),
            prompt_version: "".to_string(),
            model_id: "gpt-3.5-turbo".to_string(),
            decoding: DecodingConfig::default(),
            n_splits: 5,
            seed: 42,
            example_rows: 15,
            batch_rows: 10,
        }
    }
}

impl PipelineConfig {
    pub fn new() -> Self {
        Default::default()
    }

    pub fn with_data_dir<P: AsRef<Path>>(mut self, data_dir: P) -> Self {
        self.data_dir = data_dir.as_ref().to_path_buf();
        self
    }

    pub fn with_results_dir<P: AsRef<Path>>(mut self, results_dir: P) -> Self {
        self.results_dir = results_dir.as_ref().to_path_buf();
        self
    }

    pub fn with_splits_prefix<S: Into<String>>(mut self, splits_prefix: S) -> Self {
        self.splits_prefix = splits_prefix.into();
        self
    }

    pub fn with_prompt_version<S: Into<String>>(mut self, prompt_version: S) -> Self {
        self.prompt_version = prompt_version.into();
        self
    }

    pub fn with_model_id<S: Into<String>>(mut self, model_id: S) -> Self {
        self.model_id = model_id.into();
        self
    }

    pub fn with_n_splits(mut self, n_splits: usize) -> Self {
        self.n_splits = n_splits;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    pub fn with_example_rows(mut self, example_rows: usize) -> Self {
        self.example_rows = example_rows;
        self
    }

    pub fn with_batch_rows(mut self, batch_rows: usize) -> Self {
        self.batch_rows = batch_rows;
        self
    }

    pub fn labelled_dataset_path(&self) -> PathBuf {
        self.data_dir.join(&self.labelled_dataset)
    }

    pub fn unlabelled_dataset_path(&self) -> PathBuf {
        self.data_dir.join(&self.unlabelled_dataset)
    }

    pub fn template_path(&self) -> PathBuf {
        self.data_dir
            .join(format!("{}{}.txt", self.prompt_template, self.prompt_version))
    }

    pub fn splits_dir(&self) -> PathBuf {
        self.data_dir.join("splits")
    }

    pub fn train_split_path(&self, split_no: usize) -> PathBuf {
        self.splits_dir()
            .join(format!("{}-train_split_{split_no}.csv", self.splits_prefix))
    }

    pub fn test_split_path(&self, split_no: usize) -> PathBuf {
        self.splits_dir()
            .join(format!("{}-test_split_{split_no}.csv", self.splits_prefix))
    }

    pub fn true_split_path(&self, split_no: usize) -> PathBuf {
        self.splits_dir()
            .join(format!("{}-true_split_{split_no}.csv", self.splits_prefix))
    }

    /// Raw transcript of model output for one split, one record line per line.
    pub fn pred_transcript_path(&self, split_name: &str) -> PathBuf {
        self.results_dir.join(format!(
            "{}-pred_split_{split_name}{}.txt",
            self.splits_prefix, self.prompt_version
        ))
    }

    /// Structured table parsed from the transcript, same schema as the input.
    pub fn pred_table_path(&self, split_name: &str) -> PathBuf {
        self.results_dir.join(format!(
            "{}-pred_split_{split_name}{}.csv",
            self.splits_prefix, self.prompt_version
        ))
    }

    pub fn comparison_path(&self) -> PathBuf {
        self.results_dir
            .join(format!("label_comparison{}.csv", self.prompt_version))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn artifact_names_carry_the_prompt_version() {
        let config = PipelineConfig::new()
            .with_prompt_version("-v2")
            .with_splits_prefix("dd");

        assert_eq!(
            config.template_path(),
            PathBuf::from("data/dd-gpt-prompt-v2.txt")
        );
        assert_eq!(
            config.pred_transcript_path("3"),
            PathBuf::from("results/dd-pred_split_3-v2.txt")
        );
        assert_eq!(
            config.pred_table_path("unseen"),
            PathBuf::from("results/dd-pred_split_unseen-v2.csv")
        );
        assert_eq!(
            config.comparison_path(),
            PathBuf::from("results/label_comparison-v2.csv")
        );
    }

    #[test]
    fn split_tables_are_not_versioned() {
        let config = PipelineConfig::new().with_prompt_version("-v2");
        assert_eq!(
            config.train_split_path(0),
            PathBuf::from("data/splits/dd-train_split_0.csv")
        );
        assert_eq!(
            config.test_split_path(4),
            PathBuf::from("data/splits/dd-test_split_4.csv")
        );
    }
}
