use super::Sample;
use anyhow::Result;
use csv::ReaderBuilder;
use std::path::Path;

pub fn samples_from_csv<P: AsRef<Path>>(path: P) -> Result<Vec<Sample>> {
    let path = path.as_ref();
    let mut sample_reader = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_path(path)
        .map_err(|e| anyhow::anyhow!("failed to open {}: {e}", path.display()))?;

    let mut samples = vec![];
    for result in sample_reader.deserialize() {
        let sample: Sample = result?;
        samples.push(sample);
    }
    Ok(samples)
}
