use crate::numerical::quadrature_compare::ResultSet;
use chrono::Local;
use csv::WriterBuilder;
use log::info;
use simplelog::*;
use std::error::Error;
use std::fs::File;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

pub const CSV_HEADER: [&str; 4] = ["n", "method", "value", "abs_err"];

/// maps the user-facing level name to a filter; `None` means logging is switched off
pub fn parse_loglevel(level: &str) -> Result<Option<LevelFilter>, String> {
    match level.trim().to_lowercase().as_str() {
        "off" | "none" => Ok(None),
        "debug" => Ok(Some(LevelFilter::Debug)),
        "info" => Ok(Some(LevelFilter::Info)),
        "warn" => Ok(Some(LevelFilter::Warn)),
        "error" => Ok(Some(LevelFilter::Error)),
        other => Err(format!(
            "loglevel must be debug, info, warn, error or off, got '{}'",
            other
        )),
    }
}

/// `log_<date>_<time>.txt` in the current directory
pub fn default_log_file_name() -> PathBuf {
    let date_and_time = Local::now().format("%Y-%m-%d_%H-%M-%S");
    PathBuf::from(format!("log_{}.txt", date_and_time))
}

/// Console logger plus an optional file logger. Calling it a second time is harmless:
/// the first initialized logger stays active.
pub fn init_logger(level: Option<LevelFilter>, log_file: Option<&Path>) -> io::Result<()> {
    let Some(level) = level else {
        return Ok(());
    };
    let mut loggers: Vec<Box<dyn SharedLogger>> = vec![TermLogger::new(
        level,
        Config::default(),
        TerminalMode::Mixed,
        ColorChoice::Auto,
    )];
    if let Some(path) = log_file {
        let file = File::create(path)?;
        loggers.push(WriteLogger::new(level, Config::default(), file));
    }
    let _ = CombinedLogger::init(loggers);
    Ok(())
}

/// Writes one `;`-separated row per record, in result-set order. Values use the shortest
/// representation that reads back to the same f64; an undefined error is an empty field.
pub fn write_results_csv<W: Write>(results: &ResultSet, writer: W) -> Result<(), Box<dyn Error>> {
    let mut wtr = WriterBuilder::new().delimiter(b';').from_writer(writer);
    wtr.write_record(CSV_HEADER)?;
    for r in results {
        let abs_err = r.abs_err.map(|e| e.to_string()).unwrap_or_default();
        wtr.write_record([r.n.to_string(), r.name(), r.value.to_string(), abs_err])?;
    }
    wtr.flush()?;
    Ok(())
}

pub fn save_results_to_csv(results: &ResultSet, filename: &Path) -> Result<(), Box<dyn Error>> {
    let file = File::create(filename)?;
    write_results_csv(results, file)?;
    info!("CSV saved to: {}", filename.display());
    Ok(())
}
