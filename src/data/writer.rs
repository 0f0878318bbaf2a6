use super::Sample;
use anyhow::Result;
use csv::Writer;
use std::{
    fs::{self, File},
    path::Path,
};

pub fn save_samples_to_csv<P: AsRef<Path>>(samples: &[Sample], path: P) -> Result<()> {
    let path = path.as_ref();
    if let Some(parent) = path.parent() {
        if !parent.exists() {
            fs::create_dir_all(parent)?;
        }
    }
    let file = File::create(path)?;
    let mut writer = Writer::from_writer(file);
    for sample in samples {
        writer.serialize(sample)?;
    }
    writer.flush()?;
    Ok(())
}
