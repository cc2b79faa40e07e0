use anyhow::Context;
use clap::Parser;
use fcb_datapump::record::CreditContract;
use fcb_datapump::{archive, Config, DataPumpClient, Outcome, SubmissionFields};
use std::path::{Path, PathBuf};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Submit a credit contract to the credit bureau data pump service.
#[derive(Debug, Parser)]
#[command(name = "fcb-datapump", version)]
struct Args {
    /// Render the credit record without contacting the service.
    #[arg(long)]
    dry_run: bool,

    /// JSON object of submission fields.
    fields: PathBuf,
}

/// Reads a JSON object of submission fields from `path`.
fn load_fields(path: &Path) -> anyhow::Result<SubmissionFields> {
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    let json: serde_json::Value = serde_json::from_str(&raw)
        .with_context(|| format!("{} is not valid JSON", path.display()))?;
    SubmissionFields::from_json(&json).map_err(|e| anyhow::anyhow!("{}: {}", path.display(), e))
}

/// Renders the credit record and archive without contacting the service.
fn dry_run(fields: &SubmissionFields) -> anyhow::Result<()> {
    let contract = match CreditContract::from_fields(fields) {
        Ok(contract) => contract,
        Err(failure) => {
            println!("{}", serde_json::to_string_pretty(&Outcome::failure(failure))?);
            return Ok(());
        }
    };

    let document = contract.to_xml()?;
    let zipped = archive::pack(&document)?;
    println!("{}", String::from_utf8_lossy(&document));
    tracing::info!("Encoded archive is {} characters", zipped.len());
    Ok(())
}

/// Submits one field file to the data pump and prints the outcome as JSON.
///
/// Exits non-zero when the outcome is a failure.
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "fcb_datapump=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let args = Args::parse();

    let fields = load_fields(&args.fields)?;
    tracing::info!(
        "Loaded {} fields from {}",
        fields.len(),
        args.fields.display()
    );

    if args.dry_run {
        return dry_run(&fields);
    }

    let config = Config::from_env()?;
    let client = DataPumpClient::new(&config)?;
    let outcome = client.submit(&fields).await?;

    println!("{}", serde_json::to_string_pretty(&outcome)?);
    if !outcome.is_success() {
        std::process::exit(1);
    }
    Ok(())
}
