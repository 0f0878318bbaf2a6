use crate::{dataset, test_config, Result};
use llm_coder::{
    data::{create_splits, load_eval_splits, load_splits, samples_from_csv, save_samples_to_csv},
    eval::evaluate,
};
use std::fs;

#[test]
fn persisted_splits_partition_the_dataset_and_strip_labels() -> Result<()> {
    let temp = tempfile::tempdir()?;
    let config = test_config(temp.path());
    let samples = dataset(23);

    let folds = create_splits(&samples, &config)?;
    assert_eq!(folds.len(), config.n_splits);

    let mut seen_texts: Vec<String> = vec![];
    for split_no in 0..config.n_splits {
        let truth = samples_from_csv(config.true_split_path(split_no))?;
        let test = samples_from_csv(config.test_split_path(split_no))?;
        let train = samples_from_csv(config.train_split_path(split_no))?;

        assert_eq!(truth.len(), test.len());
        assert_eq!(train.len() + test.len(), samples.len());

        for (row_true, row_test) in truth.iter().zip(&test) {
            assert_eq!(row_true.text, row_test.text);
            assert!(row_true.is_labelled());
            assert!(row_test.main_theme.is_empty());
            assert!(row_test.subtheme.is_empty());
            assert!(row_test.confidence.is_empty());
            assert!(row_test.multiple_themes.is_empty());
            assert!(row_test.comments.is_empty());
            seen_texts.push(row_true.text.clone());
        }
    }

    let mut expected: Vec<String> = samples.iter().map(|s| s.text.clone()).collect();
    expected.sort();
    seen_texts.sort();
    assert_eq!(seen_texts, expected);
    Ok(())
}

#[test]
fn rerunning_overwrites_with_identical_bytes() -> Result<()> {
    let temp = tempfile::tempdir()?;
    let config = test_config(temp.path());
    let samples = dataset(17);

    create_splits(&samples, &config)?;
    let first: Vec<Vec<u8>> = (0..config.n_splits)
        .map(|i| fs::read(config.train_split_path(i)))
        .collect::<std::io::Result<_>>()?;

    create_splits(&samples, &config)?;
    for (split_no, bytes) in first.iter().enumerate() {
        assert_eq!(bytes, &fs::read(config.train_split_path(split_no))?);
    }
    Ok(())
}

#[test]
fn load_splits_round_trips_what_was_written() -> Result<()> {
    let temp = tempfile::tempdir()?;
    let config = test_config(temp.path());
    let samples = dataset(20);

    let folds = create_splits(&samples, &config)?;
    let (train_splits, test_splits) = load_splits(&config)?;

    for (fold, (train, test)) in folds.iter().zip(train_splits.iter().zip(&test_splits)) {
        assert_eq!(&fold.train, train);
        assert_eq!(&fold.test, test);
    }
    Ok(())
}

#[test]
fn eval_splits_pair_the_human_coding_with_parsed_predictions() -> Result<()> {
    let temp = tempfile::tempdir()?;
    let config = test_config(temp.path());
    let samples = dataset(15);

    let folds = create_splits(&samples, &config)?;
    // Stand in for a model run that reproduced the human coding exactly.
    for (split_no, fold) in folds.iter().enumerate() {
        save_samples_to_csv(&fold.truth, config.pred_table_path(&split_no.to_string()))?;
    }

    let (true_splits, pred_splits) = load_eval_splits(&config)?;
    let report = evaluate(&true_splits, &pred_splits)?;

    assert!((report.themes.precision - 1.0).abs() < 1e-12);
    assert!((report.themes.recall - 1.0).abs() < 1e-12);
    assert!((report.themes.f1 - 1.0).abs() < 1e-12);
    assert!((report.subthemes.f1 - 1.0).abs() < 1e-12);
    assert_eq!(report.comparison.len(), samples.len());
    Ok(())
}
