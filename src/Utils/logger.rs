use crate::Utils::task_parser::TaskError;
use crate::numerical::solve_method::RootReport;
use chrono::Local;
use csv::Writer;
use log::LevelFilter;
use simplelog::{ColorChoice, CombinedLogger, Config, SharedLogger, TermLogger, TerminalMode, WriteLogger};
use std::fs::File;
use std::path::Path;

/// Map a textual log level to a filter. `"off"` and `"none"` switch logging off.
pub fn parse_loglevel(level: &str) -> Option<LevelFilter> {
    match level {
        "off" | "none" => Some(LevelFilter::Off),
        "debug" => Some(LevelFilter::Debug),
        "info" => Some(LevelFilter::Info),
        "warn" => Some(LevelFilter::Warn),
        "error" => Some(LevelFilter::Error),
        _ => None,
    }
}

/// Install the global logger: terminal output, plus a `log_<date>_<time>.txt` file when
/// `log_to_file` is set. Returns the level in effect. A logger that is already installed
/// (e.g. by an earlier call) is left in place.
pub fn init_logger(loglevel: Option<&str>, log_to_file: bool) -> Result<LevelFilter, TaskError> {
    let level = match loglevel {
        Some(level) => parse_loglevel(level).ok_or_else(|| TaskError::InvalidLogLevel(level.to_string()))?,
        None => LevelFilter::Info,
    };
    if level == LevelFilter::Off {
        return Ok(level);
    }
    let mut loggers: Vec<Box<dyn SharedLogger>> = vec![TermLogger::new(
        level,
        Config::default(),
        TerminalMode::Mixed,
        ColorChoice::Auto,
    )];
    if log_to_file {
        let date_and_time = Local::now().format("%Y-%m-%d_%H-%M-%S");
        let name = format!("log_{}.txt", date_and_time);
        loggers.push(WriteLogger::new(level, Config::default(), File::create(name)?));
    }
    // SetLoggerError only means someone else got there first
    let _ = CombinedLogger::init(loggers);
    Ok(level)
}

/// Write the per-step history of a run as CSV: `step, x, lbound, rbound`.
pub fn save_history_to_csv(report: &RootReport, path: &Path) -> Result<(), csv::Error> {
    let mut writer = Writer::from_path(path)?;
    writer.write_record(["step", "x", "lbound", "rbound"])?;
    for record in &report.history {
        writer.write_record([
            record.step.to_string(),
            record.x.to_string(),
            record.lbound.to_string(),
            record.rbound.to_string(),
        ])?;
    }
    writer.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::numerical::methods::MethodKind;
    use crate::numerical::solve_method::StepRecord;
    use rust_decimal_macros::dec;
    use tempfile::tempdir;

    #[test]
    fn test_parse_loglevel() {
        assert_eq!(parse_loglevel("debug"), Some(LevelFilter::Debug));
        assert_eq!(parse_loglevel("none"), Some(LevelFilter::Off));
        assert_eq!(parse_loglevel("verbose"), None);
    }

    #[test]
    fn test_disabled_logging_installs_nothing() {
        assert_eq!(init_logger(Some("off"), true).unwrap(), LevelFilter::Off);
        assert!(matches!(
            init_logger(Some("loud"), false),
            Err(TaskError::InvalidLogLevel(level)) if level == "loud"
        ));
    }

    #[test]
    fn test_history_csv() {
        let report = RootReport {
            method: MethodKind::Bisection,
            root: dec!(-4.5),
            f_root: dec!(4.62),
            iterations: 2,
            lbound: dec!(-5),
            rbound: dec!(-4.5),
            history: vec![
                StepRecord { step: 1, x: dec!(-5), lbound: dec!(-5), rbound: dec!(-4) },
                StepRecord { step: 2, x: dec!(-4.5), lbound: dec!(-5), rbound: dec!(-4.5) },
            ],
            trace: Vec::new(),
        };
        let dir = tempdir().unwrap();
        let path = dir.path().join("history.csv");
        save_history_to_csv(&report, &path).unwrap();
        let written = std::fs::read_to_string(&path).unwrap();
        assert_eq!(written, "step,x,lbound,rbound\n1,-5,-5,-4\n2,-4.5,-5,-4.5\n");
    }
}
