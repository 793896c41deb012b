//! yield-cli: command-line front end for the crop yield prediction service
//!
//! Usage:
//!   yield-cli predict --region North --soil-type Loam --crop Wheat \
//!       --rainfall-mm 500 --temperature-celsius 25 --weather-condition Sunny \
//!       --days-to-harvest 120
//!   yield-cli model-info

use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use crop_yield_client::{
    ClientConfig, Field, FormState, OutcomeSink, PredictionClient, PredictionOutcome, SubmitStatus,
};
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;
use std::time::Duration;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "yield-cli")]
#[command(about = "Crop yield prediction client", long_about = None)]
#[command(version)]
struct Cli {
    /// Service base URL (overrides config file and $YIELD_API_BASE_URL)
    #[arg(long, global = true)]
    base_url: Option<String>,

    /// Whole-request timeout in seconds
    #[arg(long, global = true)]
    timeout_secs: Option<u64>,

    /// YAML config file
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Validate the inputs and request a yield prediction
    Predict(PredictArgs),
    /// Show model metadata and supported categories
    ModelInfo,
}

/// Raw strings; validation happens in the form, not in clap.
#[derive(Args)]
struct PredictArgs {
    #[arg(long, default_value = "")]
    region: String,
    #[arg(long, default_value = "")]
    soil_type: String,
    #[arg(long, default_value = "")]
    crop: String,
    #[arg(long, default_value = "")]
    rainfall_mm: String,
    #[arg(long, default_value = "", allow_hyphen_values = true)]
    temperature_celsius: String,
    /// TRUE or FALSE
    #[arg(long, default_value = "TRUE")]
    fertilizer_used: String,
    /// TRUE or FALSE
    #[arg(long, default_value = "FALSE")]
    irrigation_used: String,
    #[arg(long, default_value = "")]
    weather_condition: String,
    #[arg(long, default_value = "")]
    days_to_harvest: String,
}

impl PredictArgs {
    fn to_form(&self) -> FormState {
        FormState::new()
            .with_text(Field::Region, &self.region)
            .with_text(Field::SoilType, &self.soil_type)
            .with_text(Field::Crop, &self.crop)
            .with_text(Field::RainfallMm, &self.rainfall_mm)
            .with_text(Field::TemperatureCelsius, &self.temperature_celsius)
            .with_text(Field::FertilizerUsed, &self.fertilizer_used)
            .with_text(Field::IrrigationUsed, &self.irrigation_used)
            .with_text(Field::WeatherCondition, &self.weather_condition)
            .with_text(Field::DaysToHarvest, &self.days_to_harvest)
    }
}

/// Prints outcomes the way the app's result dialogs word them.
struct ConsoleOutcomeSink;

impl OutcomeSink for ConsoleOutcomeSink {
    fn on_success(&self, yield_text: &str) {
        println!("Prediction Result");
        println!("  Predicted yield: {}", yield_text);
    }

    fn on_api_error(&self, status_code: u16, message: &str) {
        eprintln!("Error");
        eprintln!("  API Error ({}): {}", status_code, message);
    }

    fn on_transport_error(&self, message: &str) {
        eprintln!("Error");
        eprintln!("  Network error: {}", message);
    }
}

fn load_config(cli: &Cli) -> Result<ClientConfig> {
    let mut config = match &cli.config {
        Some(path) => ClientConfig::from_yaml_file(path)?,
        None => ClientConfig::from_env(),
    };
    if let Some(url) = &cli.base_url {
        config.base_url = url.clone();
    }
    if let Some(secs) = cli.timeout_secs {
        config.timeout = Duration::from_secs(secs);
    }
    Ok(config)
}

async fn cmd_predict(client: &PredictionClient, args: &PredictArgs) -> ExitCode {
    let request = match args.to_form().to_request() {
        Ok(request) => request,
        Err(validation) => {
            eprintln!("Please fix the following fields:");
            for (field, message) in validation.errors() {
                eprintln!("  {}: {}", field, message);
            }
            return ExitCode::from(2);
        }
    };

    match client.submit(request).await {
        SubmitStatus::Completed(PredictionOutcome::Success(estimate)) => {
            if let Some(level) = estimate.confidence() {
                println!("  Confidence: {}", level);
            }
            if let Some(version) = &estimate.model_version {
                println!("  Model: {}", version);
            }
            ExitCode::SUCCESS
        }
        SubmitStatus::Completed(PredictionOutcome::ApiError { suggestions, .. }) => {
            for s in &suggestions {
                eprintln!("  - {}", s);
            }
            ExitCode::FAILURE
        }
        SubmitStatus::Completed(PredictionOutcome::TransportError { .. }) => ExitCode::FAILURE,
        other => {
            eprintln!("Submission did not complete: {:?}", other);
            ExitCode::FAILURE
        }
    }
}

async fn cmd_model_info(client: &PredictionClient) -> Result<()> {
    let info = client.model_info().await?;
    println!(
        "Model: {} ({})",
        info.model_name.as_deref().unwrap_or("unknown"),
        info.model_version.as_deref().unwrap_or("unknown")
    );
    if let Some(status) = &info.model_status {
        println!("Status: {}", status);
    }
    let features = &info.supported_features;
    for (label, values) in [
        ("Regions", &features.regions),
        ("Soil types", &features.soil_types),
        ("Crops", &features.crops),
        ("Weather conditions", &features.weather_conditions),
    ] {
        println!("{}: {}", label, values.join(", "));
    }
    Ok(())
}

#[tokio::main]
async fn main() -> Result<ExitCode> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let config = load_config(&cli)?;
    let client = PredictionClient::builder()
        .config(config)
        .outcome_sink(Arc::new(ConsoleOutcomeSink))
        .build()?;

    match &cli.command {
        Commands::Predict(args) => Ok(cmd_predict(&client, args).await),
        Commands::ModelInfo => {
            cmd_model_info(&client).await?;
            Ok(ExitCode::SUCCESS)
        }
    }
}
