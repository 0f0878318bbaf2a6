use crate::data::Sample;
use serde::Serialize;
use std::{collections::BTreeSet, path::Path};

/// Aggregate set-overlap scores for one label family (themes or subthemes).
///
/// Every ratio is plain division over the aggregate counts; a zero
/// denominator yields `NaN` rather than a panic, which only happens when no
/// labels exist anywhere in the fold.
#[derive(Clone, Copy, Debug)]
pub struct Metrics {
    pub accuracy: f64,
    pub precision: f64,
    pub recall: f64,
    pub f1: f64,
}

impl Metrics {
    pub fn from_counts(counts: &OverlapCounts) -> Self {
        let tp = counts.true_positives as f64;
        let fp = counts.false_positives as f64;
        let fn_ = counts.false_negatives as f64;

        let accuracy = tp / (tp + fp + fn_);
        let precision = tp / (tp + fp);
        let recall = tp / (tp + fn_);
        let f1 = 2.0 * (precision * recall) / (precision + recall);

        Self {
            accuracy,
            precision,
            recall,
            f1,
        }
    }
}

/// Running tp/fp/fn totals over all rows of a comparison.
#[derive(Clone, Copy, Debug, Default)]
pub struct OverlapCounts {
    pub true_positives: usize,
    pub false_positives: usize,
    pub false_negatives: usize,
}

impl OverlapCounts {
    pub fn add(&mut self, truth: &BTreeSet<String>, pred: &BTreeSet<String>) {
        self.true_positives += truth.intersection(pred).count();
        self.false_negatives += truth.difference(pred).count();
        self.false_positives += pred.difference(truth).count();
    }
}

/// Split one row's coding into its theme and subtheme tags.
///
/// A row coded with `multiple_themes` carries a newline-delimited tag list;
/// a tag containing a `.` is a subtheme, anything else a theme. Rows without
/// it fall back to the singleton `main_theme` / `subtheme` columns. Empty
/// strings never become tags, so an uncoded row contributes nothing.
pub fn extract_tags(sample: &Sample) -> (Vec<String>, Vec<String>) {
    let mut themes = vec![];
    let mut subthemes = vec![];

    if sample.multiple_themes.trim().is_empty() {
        if !sample.main_theme.is_empty() {
            themes.push(sample.main_theme.clone());
        }
        if !sample.subtheme.is_empty() {
            subthemes.push(sample.subtheme.clone());
        }
    } else {
        for tag in sample.multiple_themes.trim().split('\n') {
            let tag = tag.trim();
            if tag.is_empty() {
                continue;
            }
            if tag.contains('.') {
                subthemes.push(tag.to_string());
            } else {
                themes.push(tag.to_string());
            }
        }
    }
    (themes, subthemes)
}

/// One row of the human-vs-model comparison table. Multi-tag cells are
/// newline-joined, mirroring the `Multiple themes` input column.
#[derive(Clone, Debug, Serialize)]
pub struct ComparisonRow {
    #[serde(rename = "Text")]
    pub text: String,
    #[serde(rename = "Theme True")]
    pub theme_true: String,
    #[serde(rename = "Theme Pred")]
    pub theme_pred: String,
    #[serde(rename = "Subtheme True")]
    pub subtheme_true: String,
    #[serde(rename = "Subtheme Pred")]
    pub subtheme_pred: String,
}

#[derive(Debug)]
pub struct EvalReport {
    pub themes: Metrics,
    pub subthemes: Metrics,
    pub comparison: Vec<ComparisonRow>,
}

impl EvalReport {
    pub fn print(&self) {
        println!("  Theme Accuracy: {:.4}", self.themes.accuracy);
        println!("  Theme Precision: {:.4}", self.themes.precision);
        println!("  Theme Recall: {:.4}", self.themes.recall);
        println!("  Theme F1 Score: {:.4}", self.themes.f1);
        println!("  Subtheme Accuracy: {:.4}", self.subthemes.accuracy);
        println!("  Subtheme Precision: {:.4}", self.subthemes.precision);
        println!("  Subtheme Recall: {:.4}", self.subthemes.recall);
        println!("  Subtheme F1 Score: {:.4}", self.subthemes.f1);
    }
}

/// Score the parsed predictions of every split against the human coding.
///
/// Rows pair strictly by position; a count mismatch would silently misalign
/// every later row, so it is checked per split and is a hard error.
pub fn evaluate(
    true_splits: &[Vec<Sample>],
    pred_splits: &[Vec<Sample>],
) -> crate::Result<EvalReport> {
    if true_splits.len() != pred_splits.len() {
        crate::bail!(
            "{} true splits but {} predicted splits",
            true_splits.len(),
            pred_splits.len()
        );
    }

    let mut theme_counts = OverlapCounts::default();
    let mut subtheme_counts = OverlapCounts::default();
    let mut comparison = vec![];

    for (split_no, (truth, pred)) in true_splits.iter().zip(pred_splits).enumerate() {
        if truth.len() != pred.len() {
            crate::bail!(
                "split {split_no}: {} true rows but {} predicted rows; rows pair by position and cannot be compared",
                truth.len(),
                pred.len()
            );
        }

        for (row_true, row_pred) in truth.iter().zip(pred) {
            let (true_themes, true_subthemes) = extract_tags(row_true);
            let (pred_themes, pred_subthemes) = extract_tags(row_pred);

            theme_counts.add(&to_set(&true_themes), &to_set(&pred_themes));
            subtheme_counts.add(&to_set(&true_subthemes), &to_set(&pred_subthemes));

            comparison.push(ComparisonRow {
                text: row_true.text.clone(),
                theme_true: true_themes.join("\n"),
                theme_pred: pred_themes.join("\n"),
                subtheme_true: true_subthemes.join("\n"),
                subtheme_pred: pred_subthemes.join("\n"),
            });
        }
    }

    Ok(EvalReport {
        themes: Metrics::from_counts(&theme_counts),
        subthemes: Metrics::from_counts(&subtheme_counts),
        comparison,
    })
}

fn to_set(tags: &[String]) -> BTreeSet<String> {
    tags.iter().cloned().collect()
}

pub fn save_comparison_to_csv<P: AsRef<Path>>(
    rows: &[ComparisonRow],
    path: P,
) -> crate::Result<()> {
    let path = path.as_ref();
    if let Some(parent) = path.parent() {
        if !parent.exists() {
            std::fs::create_dir_all(parent)?;
        }
    }
    let mut writer = csv::Writer::from_path(path)?;
    for row in rows {
        writer.serialize(row)?;
    }
    writer.flush()?;
    Ok(())
}
