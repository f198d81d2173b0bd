//! CLI command implementations
//!
//! Each submodule implements a specific CLI command. Every command loads a
//! schedule file first: `.json` files use the schedule codec, `.toml` files
//! carry the same record as TOML tables.

pub mod calendar;
pub mod check;
pub mod count;
pub mod next;

use std::path::Path;

use careplan_core::types::{Date, TimeOfDay};
use careplan_schedules::schedules::{codec, CareSchedule, ScheduleRecord, ScheduleSpec};
use tracing::debug;

use crate::{CliError, Result};

const WEEKDAYS: [&str; 7] = ["Sun", "Mon", "Tue", "Wed", "Thu", "Fri", "Sat"];

/// Load a schedule definition file
pub fn load_spec(path: &Path) -> Result<ScheduleSpec> {
    if !path.exists() {
        return Err(CliError::FileNotFound(path.display().to_string()));
    }

    let contents = std::fs::read_to_string(path)?;
    let extension = path
        .extension()
        .and_then(|ext| ext.to_str())
        .map(str::to_lowercase);

    let spec = match extension.as_deref() {
        Some("json") => codec::decode_json(&contents)?,
        Some("toml") => {
            let record: ScheduleRecord = toml::from_str(&contents)?;
            codec::from_record(record)?
        }
        _ => {
            return Err(CliError::InvalidArgument(format!(
                "Unsupported schedule file: {}. Supported: .json, .toml",
                path.display()
            )))
        }
    };

    debug!(path = %path.display(), kind = %spec.kind(), "Loaded schedule file");
    Ok(spec)
}

/// Load a schedule file and bind it to its built-in rule
pub fn load_schedule(path: &Path) -> Result<CareSchedule> {
    Ok(CareSchedule::from_spec(load_spec(path)?)?)
}

/// Parse a date argument, defaulting to today
pub fn parse_date(arg: Option<&str>) -> Result<Date> {
    match arg {
        Some(s) => Ok(Date::parse(s)?),
        None => Ok(Date::today()),
    }
}

/// Short weekday name of a date
pub fn weekday_name(date: Date) -> &'static str {
    WEEKDAYS[date.weekday_index()]
}

/// Comma-separated event times, or `-` when there are none
pub fn format_times(times: &[TimeOfDay]) -> String {
    if times.is_empty() {
        return "-".to_string();
    }
    times
        .iter()
        .map(TimeOfDay::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

#[cfg(test)]
pub(crate) mod test_support {
    use std::io::Write;

    /// Sunday 2016-01-03, every other week, Sunday Tuesday Thursday at 08:00
    pub const WEEKLY_JSON: &str = r#"{
        "kind": "weekly",
        "start_time": "2016-01-03",
        "end_time": "2016-02-28",
        "times": [["08:00"], [], ["08:00", "20:00"], [], ["08:00"], [], []],
        "time_units_to_skip": 1
    }"#;

    /// 2016-01-01 every day at 08:00, unbounded
    pub const DAILY_TOML: &str = r#"
kind = "daily"
start_time = "2016-01-01"
times = [["08:00"]]
"#;

    pub fn schedule_file(contents: &str, suffix: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::Builder::new().suffix(suffix).tempfile().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file
    }
}
