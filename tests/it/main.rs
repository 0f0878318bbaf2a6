//
mod splits;

#[allow(unused_imports)]
use anyhow::{anyhow, bail, Error, Result};
use llm_coder::{config::PipelineConfig, data::Sample};
use std::path::Path;

/// A small labelled dataset with a mix of single- and multi-theme coding,
/// plus the punctuation CSV has to quote.
pub fn dataset(n_samples: usize) -> Vec<Sample> {
    (0..n_samples)
        .map(|i| Sample {
            text: format!("Sentence {i}, with a comma in it."),
            main_theme: format!("{}", i % 5 + 1),
            subtheme: format!("{}.{}", i % 5 + 1, i % 3 + 1),
            confidence: if i % 2 == 0 { "High" } else { "Medium" }.to_string(),
            multiple_themes: if i % 4 == 0 {
                format!("{}\n{}.{}\n3", i % 5 + 1, i % 5 + 1, i % 3 + 1)
            } else {
                "".to_string()
            },
            comments: if i % 7 == 0 {
                "borderline \"edge\" case".to_string()
            } else {
                "".to_string()
            },
        })
        .collect()
}

pub fn test_config(root: &Path) -> PipelineConfig {
    PipelineConfig::new()
        .with_data_dir(root.join("data"))
        .with_results_dir(root.join("results"))
}
