use super::parser::parse_lines;
use crate::{
    api::CompletionBackend,
    config::PipelineConfig,
    data::{save_samples_to_csv, Sample},
    prompt::{batch_body, PromptTemplate},
};
use std::io::Write;

/// Run one fold through the model in fixed-size batches.
///
/// Each batch is an independent request: the few-shot header plus up to
/// `batch_rows` uncoded records. The raw response lines are appended to the
/// fold's transcript as each batch lands, so a failure late in the fold keeps
/// everything already generated. Once the fold completes the transcript is
/// parsed and written out as a structured table in the input schema.
pub async fn predict_fold(
    backend: &CompletionBackend,
    template: &PromptTemplate,
    train: &[Sample],
    test: &[Sample],
    config: &PipelineConfig,
    split_name: &str,
) -> crate::Result<Vec<String>> {
    let header = template.build_header(train, config.example_rows);

    let transcript_path = config.pred_transcript_path(split_name);
    if let Some(parent) = transcript_path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    // Truncates any previous run's transcript before the first batch.
    let mut transcript = std::fs::File::create(&transcript_path)?;

    let mut response_rows: Vec<String> = vec![];
    let mut rows_done = 0;
    for batch in test.chunks(config.batch_rows.max(1)) {
        rows_done += batch.len();
        println!("    Rows {}/{}", rows_done, test.len());

        let prompt = format!("{header}{}", batch_body(batch));
        let response = backend.completion_request(prompt).await?;

        for line in response.lines() {
            writeln!(transcript, "{line}")?;
            response_rows.push(line.to_string());
        }
    }

    let parsed = parse_lines(&response_rows);
    if parsed.skipped() > 0 {
        crate::warn!(
            "split {split_name}: skipped {} of {} response lines ({} empty, {} malformed, skip rate {:.2})",
            parsed.skipped(),
            response_rows.len(),
            parsed.empty,
            parsed.malformed,
            parsed.skip_rate(response_rows.len())
        );
    }
    save_samples_to_csv(&parsed.records, config.pred_table_path(split_name))?;
    crate::info!(
        "split {split_name}: {} records parsed from {} response lines",
        parsed.records.len(),
        response_rows.len()
    );

    Ok(response_rows)
}
