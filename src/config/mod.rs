pub mod toml_config;

use crate::utils::error::{PredictorError, Result};

pub const DEFAULT_MODEL_PATH: &str = "models/campaign_event_model.json";
pub const OUTPUT_FORMATS: &[&str] = &["csv", "json"];

pub fn validate_output_formats(field_name: &str, formats: &[String]) -> Result<()> {
    if formats.is_empty() {
        return Err(PredictorError::ValidationError {
            field: field_name.to_string(),
            value: String::new(),
            reason: "At least one output format is required".to_string(),
        });
    }
    for format in formats {
        if !OUTPUT_FORMATS.contains(&format.as_str()) {
            return Err(PredictorError::ValidationError {
                field: field_name.to_string(),
                value: format.clone(),
                reason: format!(
                    "Unsupported format. Valid formats: {}",
                    OUTPUT_FORMATS.join(", ")
                ),
            });
        }
    }
    Ok(())
}

#[cfg(feature = "cli")]
pub use cli::{CliConfig, Command};

#[cfg(feature = "cli")]
mod cli {
    use super::{validate_output_formats, DEFAULT_MODEL_PATH};
    use crate::core::ConfigProvider;
    use crate::domain::form::CampaignForm;
    use crate::utils::error::Result;
    use crate::utils::validation::{validate_file_extension, validate_path, Validate};
    use clap::{Parser, Subcommand};
    use serde::{Deserialize, Serialize};

    #[derive(Debug, Clone, Serialize, Deserialize, Parser)]
    #[command(name = "campaign-predictor")]
    #[command(about = "Predict campaign outcomes with a pre-trained model")]
    pub struct CliConfig {
        #[arg(long, default_value = DEFAULT_MODEL_PATH)]
        pub model_path: String,

        #[arg(long, default_value = "./output")]
        pub output_path: String,

        #[arg(long, value_delimiter = ',', default_value = "csv")]
        pub output_formats: Vec<String>,

        #[arg(long, help = "Enable verbose output")]
        pub verbose: bool,

        #[arg(long, help = "Log CPU and memory usage per phase")]
        pub monitor: bool,

        #[arg(long, help = "Emit logs as JSON")]
        pub json_logs: bool,

        #[command(subcommand)]
        pub command: Command,
    }

    #[derive(Debug, Clone, Serialize, Deserialize, Subcommand)]
    pub enum Command {
        /// Predict every row of a CSV file and export the results
        Batch {
            /// CSV file with one campaign per row
            #[arg(long)]
            input: String,
        },
        /// Predict a single manually entered campaign
        Manual(CampaignForm),
    }

    impl ConfigProvider for CliConfig {
        fn model_path(&self) -> &str {
            &self.model_path
        }

        fn output_path(&self) -> &str {
            &self.output_path
        }

        fn output_formats(&self) -> &[String] {
            &self.output_formats
        }
    }

    impl Validate for CliConfig {
        fn validate(&self) -> Result<()> {
            validate_path("model_path", &self.model_path)?;
            validate_path("output_path", &self.output_path)?;
            validate_output_formats("output_formats", &self.output_formats)?;
            match &self.command {
                Command::Batch { input } => {
                    validate_path("input", input)?;
                    validate_file_extension("input", input, &["csv"])
                }
                Command::Manual(form) => form.validate(),
            }
        }
    }

}
