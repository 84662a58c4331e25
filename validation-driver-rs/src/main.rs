// validation-driver-rs/src/main.rs
// Validation Driver - evaluates a fixture of hosts and paths

use config_rs::DriverConfig;
use host_validation::{evaluate, load_records, FixtureError, RecordReport, ValidationRecord};
use std::process::ExitCode;

/// Counters for one pass over the fixture
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
struct Summary {
    records: usize,
    passed: usize,
    invalid_uris: usize,
}

fn verdict(valid: bool) -> &'static str {
    if valid {
        "valid"
    } else {
        "invalid"
    }
}

fn log_report(record: &ValidationRecord, report: &RecordReport) {
    log::info!("-------------------------------------------------------------------------");

    if let Some(valid) = report.domain_valid {
        log::info!("{} is {} domain", record.host, verdict(valid));
    }

    if let Some(valid) = report.uri_valid {
        log::info!("{} is {} url", record.host, verdict(valid));
    }

    match &report.subdomain {
        Some(Ok(true)) => log::info!("{} is sub domain", record.host),
        Some(Ok(false)) => log::info!("{} is root domain", record.host),
        Some(Err(e)) => log::warn!("Could not classify {}: {}", record.host, e),
        None => {}
    }

    if let Some(valid) = report.path_valid {
        log::info!("{} is {} path", record.path, verdict(valid));
    }

    if let Some(valid) = report.cert_valid {
        log::info!("cert of {} is {} base64", record.host, verdict(valid));
    }
    if let Some(valid) = report.pkey_valid {
        log::info!("pkey of {} is {} base64", record.host, verdict(valid));
    }
}

/// Load the fixture once and evaluate each record
fn run(config: &DriverConfig) -> Result<Summary, FixtureError> {
    let records = load_records(&config.fixture_path)?;

    let mut summary = Summary::default();
    for record in &records {
        let report = evaluate(record);
        log_report(record, &report);

        summary.records += 1;
        if report.all_passed() {
            summary.passed += 1;
        }
        if report.uri_valid == Some(false) {
            summary.invalid_uris += 1;
        }
    }

    Ok(summary)
}

fn main() -> Result<ExitCode, Box<dyn std::error::Error>> {
    // Load environment variables
    config_rs::load_dotenv();
    let config = DriverConfig::from_env();

    // Initialize logging
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(&config.log_level))
        .init();

    log::info!("Validation driver reading {}", config.fixture_path.display());

    let summary = match run(&config) {
        Ok(summary) => summary,
        Err(e) => {
            log::error!("{}", e);
            return Err(e.into());
        }
    };

    log::info!(
        "{} of {} records passed every check",
        summary.passed,
        summary.records
    );

    if config.strict && summary.invalid_uris > 0 {
        log::error!("{} records have an invalid URI", summary.invalid_uris);
        return Ok(ExitCode::FAILURE);
    }

    Ok(ExitCode::SUCCESS)
}
