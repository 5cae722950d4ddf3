use campaign_predictor::app::render;
use campaign_predictor::core::engine::RunReport;
use campaign_predictor::core::{ConfigProvider, Pipeline};
use campaign_predictor::utils::error::{ErrorSeverity, PredictorError};
use campaign_predictor::utils::{logger, validation::Validate};
use campaign_predictor::{
    BatchPipeline, CliConfig, Command, LinearModelArtifact, LocalStorage, ManualPipeline,
    PredictionEngine, PredictionService,
};
use clap::Parser;
use std::sync::Arc;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = CliConfig::parse();

    // 初始化日誌
    if config.json_logs {
        logger::init_json_logger();
    } else {
        logger::init_cli_logger(config.verbose);
    }

    tracing::info!("Starting campaign-predictor");
    if config.verbose {
        tracing::debug!("CLI config: {:?}", config);
    }

    // 驗證配置
    if let Err(e) = config.validate() {
        exit_with(&e);
    }

    if config.monitor {
        tracing::info!("🔍 System monitoring enabled");
    }

    // 模型只在啟動時載入一次
    let model = match LinearModelArtifact::load(config.model_path()) {
        Ok(model) => model,
        Err(e) => exit_with(&e),
    };
    let service = PredictionService::new(Arc::new(model));

    let outcome = match config.command.clone() {
        Command::Batch { input } => {
            let storage = LocalStorage::new(".");
            let pipeline = BatchPipeline::new(storage, config.clone(), service, input);
            run(pipeline, config.monitor).await
        }
        Command::Manual(form) => run(ManualPipeline::new(form, service), config.monitor).await,
    };

    match outcome {
        Ok(report) => {
            present(&report);
            Ok(())
        }
        Err(e) => exit_with(&e),
    }
}

async fn run<P: Pipeline>(pipeline: P, monitor: bool) -> campaign_predictor::Result<RunReport> {
    PredictionEngine::new_with_monitoring(pipeline, monitor)
        .run()
        .await
}

fn present(report: &RunReport) {
    if report.batch.len() == 1 && report.output_path.is_none() {
        println!("{}", render::single_prediction(&report.batch.predictions[0]));
        return;
    }

    println!("Prediction Results:");
    println!("{}", render::batch_table(&report.batch));
    if let Some(path) = &report.output_path {
        println!();
        println!("⬇️  Predictions saved to: {}", path);
    }
}

fn exit_with(e: &PredictorError) -> ! {
    tracing::error!(
        "❌ Prediction failed: {} (Category: {:?}, Severity: {:?})",
        e,
        e.category(),
        e.severity()
    );
    tracing::error!("💡 Recovery suggestion: {}", e.recovery_suggestion());

    eprintln!("❌ {}", e.user_friendly_message());
    eprintln!("💡 Suggestion: {}", e.recovery_suggestion());

    let exit_code = match e.severity() {
        ErrorSeverity::Low => 0,
        ErrorSeverity::Medium => 2,
        ErrorSeverity::High => 1,
        ErrorSeverity::Critical => 3,
    };
    std::process::exit(exit_code)
}
