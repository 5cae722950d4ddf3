use campaign_predictor::app::render;
use campaign_predictor::config::toml_config::TomlConfig;
use campaign_predictor::core::{ConfigProvider, ModelArtifact};
use campaign_predictor::utils::error::ErrorSeverity;
use campaign_predictor::utils::{logger, validation::Validate};
use campaign_predictor::{BatchPipeline, LinearModelArtifact, LocalStorage, PredictionEngine, PredictionService};
use clap::Parser;
use std::sync::Arc;

#[derive(Parser)]
#[command(name = "toml-predict")]
#[command(about = "Batch campaign predictions driven by a TOML configuration file")]
struct Args {
    /// Path to TOML configuration file
    #[arg(short, long, default_value = "predictor.toml")]
    config: String,

    /// Enable verbose output
    #[arg(short, long)]
    verbose: bool,

    /// Override monitoring setting from config
    #[arg(long)]
    monitor: Option<bool>,

    /// Override the input CSV from config
    #[arg(long)]
    input: Option<String>,

    /// Show the configuration and model schema without predicting
    #[arg(long)]
    dry_run: bool,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    // 載入 TOML 配置
    let mut config = match TomlConfig::from_file(&args.config) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("❌ Failed to load config file '{}': {}", args.config, e);
            eprintln!("💡 Make sure the file exists and is valid TOML format");
            std::process::exit(1);
        }
    };

    if config.json_logs() {
        logger::init_json_logger();
    } else {
        logger::init_cli_logger(args.verbose);
    }
    tracing::info!("📁 Loaded configuration from: {}", args.config);

    // 套用命令列覆蓋設定
    if let Some(input) = &args.input {
        config.input.path = input.clone();
        tracing::info!("🔧 Input overridden to: {}", input);
    }

    if let Err(e) = config.validate() {
        tracing::error!("❌ Configuration validation failed: {}", e);
        eprintln!("❌ {}", e.user_friendly_message());
        eprintln!("💡 Suggestion: {}", e.recovery_suggestion());
        std::process::exit(1);
    }

    display_config_summary(&config, &args);

    let model = match LinearModelArtifact::load(config.model_path()) {
        Ok(model) => model,
        Err(e) => {
            eprintln!("❌ {}", e.user_friendly_message());
            eprintln!("💡 Suggestion: {}", e.recovery_suggestion());
            std::process::exit(3);
        }
    };

    if args.dry_run {
        tracing::info!("🔍 DRY RUN MODE - No predictions will be made");
        perform_dry_run(&config, &model);
        return Ok(());
    }

    let monitor_enabled = args.monitor.unwrap_or_else(|| config.monitoring_enabled());
    if monitor_enabled {
        tracing::info!("🔍 System monitoring enabled");
    }

    let input = config.input_path().to_string();
    let preview_rows = config.preview_rows();
    let service = PredictionService::new(Arc::new(model));
    let pipeline = BatchPipeline::new(LocalStorage::new("."), config, service, input)
        .with_preview_rows(preview_rows);
    let engine = PredictionEngine::new_with_monitoring(pipeline, monitor_enabled);

    match engine.run().await {
        Ok(report) => {
            println!("{}", render::batch_table(&report.batch));
            if let Some(path) = report.output_path {
                println!("✅ Predictions saved to: {}", path);
            }
        }
        Err(e) => {
            tracing::error!(
                "❌ Prediction run failed: {} (Category: {:?}, Severity: {:?})",
                e,
                e.category(),
                e.severity()
            );
            eprintln!("❌ {}", e.user_friendly_message());
            eprintln!("💡 Suggestion: {}", e.recovery_suggestion());

            let exit_code = match e.severity() {
                ErrorSeverity::Low => 0,
                ErrorSeverity::Medium => 2,
                ErrorSeverity::High => 1,
                ErrorSeverity::Critical => 3,
            };
            if exit_code > 0 {
                std::process::exit(exit_code);
            }
        }
    }

    Ok(())
}

fn display_config_summary(config: &TomlConfig, args: &Args) {
    println!("📋 Configuration Summary:");
    println!("  Model: {}", config.model_path());
    println!("  Input: {}", config.input_path());
    println!("  Output: {}", config.output_path());
    println!("  Formats: {}", config.output_formats().join(", "));

    if args.dry_run {
        println!("  🔍 DRY RUN MODE ENABLED");
    }

    println!();
}

fn perform_dry_run(config: &TomlConfig, model: &LinearModelArtifact) {
    println!("🔍 Dry Run Analysis:");
    println!("  Model name: {}", model.name());
    println!("  Model features: {}", model.feature_count());

    match model.expected_schema() {
        Some(schema) => {
            println!("  Expected columns (uploads are aligned to this order):");
            for column in schema.columns() {
                println!("    - {}", column);
            }
        }
        None => println!("  ⚠️ Model exposes no schema; uploads must match its column layout exactly"),
    }

    println!();
    println!("💾 Output files:");
    for format in config.output_formats() {
        let filename = match format.as_str() {
            "json" => config.json_filename(),
            _ => config.csv_filename(),
        };
        println!("  {}/{}", config.output_path(), filename);
    }
}
