use super::{reader::samples_from_csv, writer::save_samples_to_csv, Sample};
use crate::config::PipelineConfig;
use rand::{rngs::StdRng, seq::SliceRandom, SeedableRng};

/// K-fold cross-validation splitter.
///
/// The shuffle is driven by an explicitly seeded generator so the same seed
/// and dataset always produce the same partition; nothing here touches
/// process-global randomness.
#[derive(Clone, Debug)]
pub struct KFold {
    pub n_splits: usize,
    pub seed: u64,
}

impl Default for KFold {
    fn default() -> Self {
        Self {
            n_splits: 5,
            seed: 42,
        }
    }
}

impl KFold {
    pub fn new(n_splits: usize) -> Self {
        Self {
            n_splits,
            ..Default::default()
        }
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Generate `(train_indices, test_indices)` for each fold.
    ///
    /// Test indices are consecutive chunks of the shuffled permutation; the
    /// first `n_samples % n_splits` folds take one extra row. Train indices
    /// are the complement sorted back into original row order.
    pub fn split(&self, n_samples: usize) -> Vec<(Vec<usize>, Vec<usize>)> {
        let mut indices: Vec<usize> = (0..n_samples).collect();
        let mut rng = StdRng::seed_from_u64(self.seed);
        indices.shuffle(&mut rng);

        let fold_size = n_samples / self.n_splits;
        let remainder = n_samples % self.n_splits;

        let mut folds = Vec::with_capacity(self.n_splits);
        let mut start = 0;
        for i in 0..self.n_splits {
            let end = start + fold_size + usize::from(i < remainder);

            let test_indices: Vec<usize> = indices[start..end].to_vec();
            let mut train_indices: Vec<usize> = indices[..start]
                .iter()
                .chain(indices[end..].iter())
                .copied()
                .collect();
            train_indices.sort_unstable();

            folds.push((train_indices, test_indices));
            start = end;
        }
        folds
    }
}

/// One cross-validation fold: the labelled training rows, the stripped test
/// rows sent to the model, and the same test rows untouched for scoring.
/// `test` and `truth` are row-aligned and share `text` values.
#[derive(Clone, Debug, PartialEq)]
pub struct Fold {
    pub train: Vec<Sample>,
    pub test: Vec<Sample>,
    pub truth: Vec<Sample>,
}

/// Partition the labelled dataset and persist each fold's three tables under
/// the splits directory. Rerunning with the same seed and input overwrites
/// the files with identical content.
pub fn create_splits(samples: &[Sample], config: &PipelineConfig) -> crate::Result<Vec<Fold>> {
    let kfold = KFold {
        n_splits: config.n_splits,
        seed: config.seed,
    };

    let mut folds = Vec::with_capacity(config.n_splits);
    for (split_no, (train_indices, test_indices)) in
        kfold.split(samples.len()).into_iter().enumerate()
    {
        let train: Vec<Sample> = train_indices.iter().map(|&i| samples[i].clone()).collect();
        let truth: Vec<Sample> = test_indices.iter().map(|&i| samples[i].clone()).collect();
        let test: Vec<Sample> = truth.iter().map(Sample::strip_labels).collect();

        save_samples_to_csv(&train, config.train_split_path(split_no))?;
        save_samples_to_csv(&test, config.test_split_path(split_no))?;
        save_samples_to_csv(&truth, config.true_split_path(split_no))?;

        crate::info!(
            "split {split_no}: {} train rows, {} test rows",
            train.len(),
            test.len()
        );
        folds.push(Fold { train, test, truth });
    }
    Ok(folds)
}

/// Load the labelled training rows and the uncoded test rows of every split.
pub fn load_splits(config: &PipelineConfig) -> crate::Result<(Vec<Vec<Sample>>, Vec<Vec<Sample>>)> {
    let mut train_splits = vec![];
    let mut test_splits = vec![];
    for split_no in 0..config.n_splits {
        train_splits.push(samples_from_csv(config.train_split_path(split_no))?);
        test_splits.push(samples_from_csv(config.test_split_path(split_no))?);
    }
    Ok((train_splits, test_splits))
}

/// Load the human coding and the parsed model predictions of every split.
pub fn load_eval_splits(
    config: &PipelineConfig,
) -> crate::Result<(Vec<Vec<Sample>>, Vec<Vec<Sample>>)> {
    let mut true_splits = vec![];
    let mut pred_splits = vec![];
    for split_no in 0..config.n_splits {
        true_splits.push(samples_from_csv(config.true_split_path(split_no))?);
        pred_splits.push(samples_from_csv(
            config.pred_table_path(&split_no.to_string()),
        )?);
    }
    Ok((true_splits, pred_splits))
}
