use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::fs;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

// Use library instead of local modules
use receipt_points::{breakdown, logging, validate, Receipt};

#[derive(Parser)]
#[command(name = "receipt-points", version, about = "Score receipts offline")]
struct Cli {
    /// Emit logs as JSON
    #[arg(long, global = true)]
    log_json: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Validate a receipt JSON file and print its points per rule
    Score { file: PathBuf },
    /// Only validate a receipt JSON file
    Validate { file: PathBuf },
}

fn main() -> Result<ExitCode> {
    let cli = Cli::parse();
    logging::init(cli.log_json);

    match cli.command {
        Command::Score { file } => run_score(&file),
        Command::Validate { file } => run_validate(&file),
    }
}

/// Read and validate a receipt; `None` means it was rejected
fn load_receipt(path: &Path) -> Result<Option<Receipt>> {
    let bytes = fs::read(path).with_context(|| format!("Failed to read receipt file: {:?}", path))?;

    let receipt = match Receipt::from_json(&bytes) {
        Ok(receipt) => receipt,
        Err(e) => {
            tracing::debug!(error = %e, "receipt file failed to decode");
            return Ok(None);
        }
    };

    Ok(validate(&receipt).ok().map(|()| receipt))
}

fn run_score(path: &Path) -> Result<ExitCode> {
    let Some(receipt) = load_receipt(path)? else {
        eprintln!("❌ The receipt is invalid.");
        return Ok(ExitCode::FAILURE);
    };

    let breakdown = breakdown(&receipt);

    println!("🧾 {} ({} {})", receipt.retailer, receipt.purchase_date, receipt.purchase_time);
    println!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");
    for contribution in &breakdown.contributions {
        println!("  {:<20} {:>6}", contribution.rule, contribution.points);
    }
    println!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");
    println!("  {:<20} {:>6}", "total", breakdown.total());

    Ok(ExitCode::SUCCESS)
}

fn run_validate(path: &Path) -> Result<ExitCode> {
    match load_receipt(path)? {
        Some(_) => {
            println!("✓ The receipt is valid.");
            Ok(ExitCode::SUCCESS)
        }
        None => {
            eprintln!("❌ The receipt is invalid.");
            Ok(ExitCode::FAILURE)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn receipt_file(contents: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_load_receipt_decode_failure_is_rejected() {
        let file = receipt_file("not json");
        assert!(load_receipt(file.path()).unwrap().is_none());
    }

    #[test]
    fn test_load_receipt_validation_failure_is_rejected() {
        let file = receipt_file(
            r#"{"retailer": "Shop@Home", "purchaseDate": "2022-01-01", "purchaseTime": "13:01",
                "items": [{"shortDescription": "Gum", "price": "1.00"}], "total": "1.00"}"#,
        );
        assert!(load_receipt(file.path()).unwrap().is_none());
    }

    #[test]
    fn test_load_receipt_valid_file() {
        let file = receipt_file(
            r#"{"retailer": "Target", "purchaseDate": "2022-01-01", "purchaseTime": "13:01",
                "items": [{"shortDescription": "Gum", "price": "1.00"}], "total": "1.00"}"#,
        );
        let receipt = load_receipt(file.path()).unwrap().unwrap();
        assert_eq!(receipt.retailer, "Target");
    }

    #[test]
    fn test_load_receipt_missing_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        assert!(load_receipt(&dir.path().join("missing.json")).is_err());
    }
}
