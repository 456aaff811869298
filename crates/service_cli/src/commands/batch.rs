//! Batch command implementation
//!
//! Prices every request in a JSON array or CSV file. A failing row is
//! reported alongside the others rather than aborting the run.

use std::path::Path;

use pricer_core::types::{OptionParameters, PricingError, PricingRequest};
use pricer_pricing::PricingEngine;
use tracing::{info, warn};

use crate::output::{render_rows, OutputFormat, PricedRow};
use crate::{CliError, Result};

/// Run the batch command
pub fn run(engine: &PricingEngine, input: &Path, format: OutputFormat) -> Result<()> {
    info!(input = %input.display(), "Starting batch pricing");

    let requests = load_requests(input)?;
    let rows = price_requests(engine, requests);

    let failed = rows.iter().filter(|row| row.error.is_some()).count();
    if failed > 0 {
        warn!(failed, total = rows.len(), "Some requests failed");
    }

    print!("{}", render_rows(format, &rows)?);
    info!(total = rows.len(), "Batch pricing complete");
    Ok(())
}

/// Reads requests from `.json` (array) or `.csv` (header row).
pub fn load_requests(path: &Path) -> Result<Vec<PricingRequest>> {
    if !path.exists() {
        return Err(CliError::FileNotFound(path.display().to_string()));
    }

    let extension = path
        .extension()
        .and_then(|ext| ext.to_str())
        .map(str::to_lowercase);

    match extension.as_deref() {
        Some("json") => {
            let content = std::fs::read_to_string(path)?;
            Ok(serde_json::from_str(&content)?)
        }
        Some("csv") => {
            let mut reader = csv::Reader::from_path(path)?;
            let requests = reader
                .deserialize()
                .collect::<std::result::Result<Vec<PricingRequest>, _>>()?;
            Ok(requests)
        }
        _ => Err(CliError::InvalidArgument(format!(
            "Unsupported batch file: {}. Supported: .json, .csv",
            path.display()
        ))),
    }
}

/// Prices requests in input order, one row per request.
pub fn price_requests(engine: &PricingEngine, requests: Vec<PricingRequest>) -> Vec<PricedRow> {
    let parsed: Vec<std::result::Result<OptionParameters, PricingError>> =
        requests.iter().map(OptionParameters::try_from).collect();

    let valid: Vec<OptionParameters> = parsed.iter().filter_map(|p| p.clone().ok()).collect();
    let mut priced = engine.price_batch(&valid).into_iter();

    requests
        .into_iter()
        .zip(parsed)
        .map(|(request, params)| {
            let outcome = match params {
                Ok(_) => priced.next().unwrap_or_else(|| {
                    Err(PricingError::NumericalInstability(
                        "batch result missing".to_string(),
                    ))
                }),
                Err(e) => Err(e),
            };
            match outcome {
                Ok(result) => PricedRow {
                    request,
                    result: Some(result),
                    error: None,
                },
                Err(e) => PricedRow {
                    request,
                    result: None,
                    error: Some(e.to_string()),
                },
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn request(side: &str, volatility: f64) -> PricingRequest {
        PricingRequest {
            side: side.to_string(),
            spot: 100.0,
            strike: 100.0,
            time_to_maturity: 1.0,
            volatility,
            risk_free_rate: 0.05,
            dividend_yield: 0.0,
            mode: "continuous".to_string(),
        }
    }

    #[test]
    fn test_failures_stay_in_place() {
        let engine = PricingEngine::default();
        let rows = price_requests(
            &engine,
            vec![
                request("call", 0.2),
                request("straddle", 0.2),
                request("put", 0.0),
                request("put", 0.2),
            ],
        );

        assert_eq!(rows.len(), 4);
        assert!(rows[0].result.is_some());
        assert!(rows[1].error.as_deref().unwrap().contains("straddle"));
        assert!(rows[2].error.as_deref().unwrap().starts_with("Singular input"));
        assert_eq!(rows[3].request.side, "put");
        assert!(rows[3].result.unwrap().delta < 0.0);
    }

    #[test]
    fn test_missing_file() {
        let err = load_requests(Path::new("/nonexistent/requests.json")).unwrap_err();
        assert!(matches!(err, CliError::FileNotFound(_)));
    }

    #[test]
    fn test_load_csv() {
        let path = std::env::temp_dir().join("bsgreeks_batch_test.csv");
        {
            let mut file = std::fs::File::create(&path).unwrap();
            writeln!(
                file,
                "side,spot,strike,time_to_maturity,volatility,risk_free_rate,dividend_yield,mode"
            )
            .unwrap();
            writeln!(file, "call,100,100,1,0.2,0.05,0,continuous").unwrap();
            writeln!(file, "put,100,110,0.5,0.3,0.02,0.01,discrete").unwrap();
        }

        let requests = load_requests(&path).unwrap();
        std::fs::remove_file(&path).ok();

        assert_eq!(requests.len(), 2);
        assert_eq!(requests[1].mode, "discrete");
        assert_eq!(requests[1].strike, 110.0);
    }

    #[test]
    fn test_load_json() {
        let path = std::env::temp_dir().join("bsgreeks_batch_test.json");
        std::fs::write(
            &path,
            r#"[{"side": "call", "spot": 100, "strike": 95, "timeToMaturity": 0.5,
                 "volatility": 0.25, "riskFreeRate": 0.03, "dividendYield": 0.0,
                 "mode": "continuous"}]"#,
        )
        .unwrap();

        let requests = load_requests(&path).unwrap();
        std::fs::remove_file(&path).ok();

        assert_eq!(requests.len(), 1);
        assert_eq!(requests[0].risk_free_rate, 0.03);
    }

    #[test]
    fn test_load_json_without_rate_fails() {
        let path = std::env::temp_dir().join("bsgreeks_batch_missing_rate.json");
        std::fs::write(
            &path,
            r#"[{"side": "call", "spot": 100, "strike": 100, "timeToMaturity": 1, "volatility": 0.2}]"#,
        )
        .unwrap();

        let err = load_requests(&path).unwrap_err();
        std::fs::remove_file(&path).ok();

        assert!(matches!(err, CliError::Json(_)));
    }
}
