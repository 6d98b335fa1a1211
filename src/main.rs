//! Webshell trainer entrypoint: one batch run from the configured corpus roots to the
//! artifact at `model_path`. Exits non-zero without writing anything if no samples are found.

use webshell_trainer::{
    config::TrainerConfig,
    corpus::CorpusError,
    features::feature_names,
    logging::StructuredLogger,
    pipeline::{self, PipelineError},
    training::RandomForest,
};
use tracing::info;

fn main() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let config_path = std::env::var("WEBSHELL_TRAINER_CONFIG")
        .map(std::path::PathBuf::from)
        .unwrap_or_else(|_| std::path::PathBuf::from("trainer.json"));
    let config = TrainerConfig::load(&config_path);

    StructuredLogger::init(config.log.json, &config.log.level);

    info!(
        benign = %config.corpus.benign_dir.display(),
        malicious = %config.corpus.malicious_dir.display(),
        model_path = %config.model_path.display(),
        "webshell trainer starting"
    );

    let mut forest = RandomForest::new(config.training.clone());
    let summary = match pipeline::run(&config, &mut forest) {
        Ok(s) => s,
        Err(PipelineError::Corpus(CorpusError::NoSamples)) => {
            eprintln!("No samples found!");
            std::process::exit(1);
        }
        Err(e) => return Err(e.into()),
    };

    match &summary.report {
        Some(report) => println!("\nModel Evaluation:\n{}", report),
        None => println!("\nModel Evaluation: skipped (no held-out samples)"),
    }

    println!("Model saved to {}", summary.receipt.path.display());

    if config.log.json {
        let mut out = std::io::stdout().lock();
        StructuredLogger::write_importances(&summary.artifact.weights, &mut out)?;
    } else {
        println!("\nFeature Importance:");
        for (name, importance) in feature_names().zip(summary.artifact.weights.iter()) {
            println!("{}: {:.4}", name, importance);
        }
    }

    info!(
        sha256 = %summary.receipt.sha256,
        train = summary.train_size,
        test = summary.test_size,
        "webshell trainer run complete"
    );
    Ok(())
}
