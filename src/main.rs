use llm_coder::{
    api::{backoff::BackoffPolicy, config::ApiConfig, CompletionBackend},
    config::PipelineConfig,
    data::{create_splits, load_eval_splits, load_splits, samples_from_csv},
    eval::{evaluate, save_comparison_to_csv},
    logging::LoggingConfig,
    pipeline::predict_fold,
    prompt::PromptTemplate,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = PipelineConfig::default();
    let mut logging = LoggingConfig::new();
    logging.load_logger()?;

    // Credentials are resolved here so a missing key fails before any work.
    let backend = CompletionBackend::new(
        ApiConfig::new(),
        BackoffPolicy::default(),
        &config.model_id,
        config.decoding.clone(),
    )?;
    let template = PromptTemplate::load(config.template_path())?;

    println!(">> Creating splits from labelled data.");
    let labelled = samples_from_csv(config.labelled_dataset_path())?;
    create_splits(&labelled, &config)?;

    println!(">> Processing labelled data splits.");
    let (train_splits, test_splits) = load_splits(&config)?;
    for (split_no, (train, test)) in train_splits.iter().zip(&test_splits).enumerate() {
        println!(
            "  Processing split {}/{}",
            split_no + 1,
            train_splits.len()
        );
        predict_fold(
            &backend,
            &template,
            train,
            test,
            &config,
            &split_no.to_string(),
        )
        .await?;
    }

    println!(">> Evaluating predictions.");
    let (true_splits, pred_splits) = load_eval_splits(&config)?;
    let report = evaluate(&true_splits, &pred_splits)?;
    report.print();
    save_comparison_to_csv(&report.comparison, config.comparison_path())?;

    println!(">> Processing unlabelled data.");
    let unseen = samples_from_csv(config.unlabelled_dataset_path())?;
    println!("  Processing split 1/1");
    predict_fold(&backend, &template, &labelled, &unseen, &config, "unseen").await?;

    println!(">> All tasks finished!");
    Ok(())
}
