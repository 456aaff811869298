//! Output rendering: table, JSON and CSV.

use std::fmt::{self, Write};
use std::str::FromStr;

use pricer_core::types::{PricingRequest, PricingResult};
use serde::Serialize;

use crate::config::ConfigError;
use crate::Result;

/// Width of the longest Greeks bar in table output.
const BAR_WIDTH: usize = 30;

/// Output format for command results.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    #[default]
    Table,
    Json,
    Csv,
}

impl FromStr for OutputFormat {
    type Err = ConfigError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "table" => Ok(OutputFormat::Table),
            "json" => Ok(OutputFormat::Json),
            "csv" => Ok(OutputFormat::Csv),
            _ => Err(ConfigError::InvalidValue {
                name: "format",
                value: s.to_string(),
            }),
        }
    }
}

/// One priced row; `error` is set instead of `result` on failure.
#[derive(Debug, Clone, Serialize)]
pub struct PricedRow {
    pub request: PricingRequest,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result: Option<PricingResult>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Flat record for CSV output.
#[derive(Debug, Serialize)]
struct CsvRecord<'a> {
    side: &'a str,
    mode: &'a str,
    spot: f64,
    strike: f64,
    time_to_maturity: f64,
    volatility: f64,
    risk_free_rate: f64,
    dividend_yield: f64,
    price: Option<f64>,
    delta: Option<f64>,
    gamma: Option<f64>,
    theta: Option<f64>,
    vega: Option<f64>,
    rho: Option<f64>,
    error: Option<&'a str>,
}

impl<'a> From<&'a PricedRow> for CsvRecord<'a> {
    fn from(row: &'a PricedRow) -> Self {
        let r = &row.request;
        let g = row.result.as_ref();
        CsvRecord {
            side: &r.side,
            mode: &r.mode,
            spot: r.spot,
            strike: r.strike,
            time_to_maturity: r.time_to_maturity,
            volatility: r.volatility,
            risk_free_rate: r.risk_free_rate,
            dividend_yield: r.dividend_yield,
            price: g.map(|g| g.price),
            delta: g.map(|g| g.delta),
            gamma: g.map(|g| g.gamma),
            theta: g.map(|g| g.theta),
            vega: g.map(|g| g.vega),
            rho: g.map(|g| g.rho),
            error: row.error.as_deref(),
        }
    }
}

/// Renders priced rows in `format`.
pub fn render_rows(format: OutputFormat, rows: &[PricedRow]) -> Result<String> {
    match format {
        OutputFormat::Json => Ok(serde_json::to_string_pretty(rows)?),
        OutputFormat::Csv => to_csv(rows.iter().map(CsvRecord::from)),
        OutputFormat::Table => {
            let tables = rows.iter().map(render_table).collect::<Result<Vec<_>>>()?;
            Ok(tables.join("\n"))
        }
    }
}

fn to_csv<S: Serialize>(records: impl IntoIterator<Item = S>) -> Result<String> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    for record in records {
        writer.serialize(record)?;
    }
    let bytes = writer
        .into_inner()
        .map_err(|e| std::io::Error::other(e.to_string()))?;
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}

/// Boxed table for one row, with premium in percent and notional terms
/// and a bar per Greek.
pub fn render_table(row: &PricedRow) -> Result<String> {
    let mut out = String::new();
    write_table(&mut out, row)?;
    Ok(out)
}

fn write_table(out: &mut impl Write, row: &PricedRow) -> fmt::Result {
    let r = &row.request;

    writeln!(out, "┌──────────────────┬──────────────────┐")?;
    text(out, "Side", &r.side)?;
    text(out, "Mode", &r.mode)?;
    number(out, "Spot", r.spot, 4)?;
    number(out, "Strike", r.strike, 4)?;
    number(out, "Maturity (y)", r.time_to_maturity, 4)?;
    number(out, "Volatility", r.volatility, 4)?;
    number(out, "Rate", r.risk_free_rate, 4)?;
    number(out, "Dividend yield", r.dividend_yield, 4)?;
    writeln!(out, "├──────────────────┼──────────────────┤")?;

    match &row.result {
        Some(result) => {
            text(out, "Premium", &format!("{:.2} %", result.price))?;
            text(out, "Notional", &format!("${:.2}", result.price * r.spot / 100.0))?;
            number(out, "Price", result.price, 6)?;
            for (name, value) in result.greeks() {
                number(out, name, value, 6)?;
            }
            writeln!(out, "└──────────────────┴──────────────────┘")?;
            write_bars(out, result)
        }
        None => {
            text(out, "Error", "")?;
            writeln!(out, "└──────────────────┴──────────────────┘")?;
            writeln!(out, "  {}", row.error.as_deref().unwrap_or("unknown error"))
        }
    }
}

fn text(out: &mut impl Write, label: &str, value: &str) -> fmt::Result {
    writeln!(out, "│ {:<16} │ {:>16} │", label, value)
}

fn number(out: &mut impl Write, label: &str, value: f64, precision: usize) -> fmt::Result {
    writeln!(out, "│ {:<16} │ {:>16.*} │", label, precision, value)
}

/// Horizontal bars scaled to the largest Greek in absolute value.
fn write_bars(out: &mut impl Write, result: &PricingResult) -> fmt::Result {
    let greeks = result.greeks();
    let max = greeks
        .iter()
        .map(|(_, v)| v.abs())
        .fold(0.0_f64, f64::max);

    for (name, value) in greeks {
        let len = if max > 0.0 {
            ((value.abs() / max) * BAR_WIDTH as f64).round() as usize
        } else {
            0
        };
        let sign = if value < 0.0 { '-' } else { '+' };
        writeln!(out, "  {:<6} {} {}", name, sign, "█".repeat(len))?;
    }
    Ok(())
}

/// Convergence ladder row.
#[derive(Debug, Clone, Serialize)]
pub struct LadderRow {
    pub steps: usize,
    pub discrete: f64,
    pub continuous: f64,
    pub error: f64,
}

/// Renders a convergence ladder in `format`.
pub fn render_ladder(format: OutputFormat, rows: &[LadderRow]) -> Result<String> {
    match format {
        OutputFormat::Json => Ok(serde_json::to_string_pretty(rows)?),
        OutputFormat::Csv => to_csv(rows),
        OutputFormat::Table => {
            let mut out = String::new();
            write_ladder(&mut out, rows)?;
            Ok(out)
        }
    }
}

fn write_ladder(out: &mut impl Write, rows: &[LadderRow]) -> fmt::Result {
    writeln!(out, "┌──────────┬──────────────┬──────────────┬──────────────┐")?;
    writeln!(
        out,
        "│ {:>8} │ {:>12} │ {:>12} │ {:>12} │",
        "Steps", "Discrete", "Continuous", "Error"
    )?;
    writeln!(out, "├──────────┼──────────────┼──────────────┼──────────────┤")?;
    for row in rows {
        writeln!(
            out,
            "│ {:>8} │ {:>12.6} │ {:>12.6} │ {:>12.2e} │",
            row.steps, row.discrete, row.continuous, row.error
        )?;
    }
    writeln!(out, "└──────────┴──────────────┴──────────────┴──────────────┘")
}
