//! Count command implementation
//!
//! Reports the number of events a schedule has on one date.

use std::path::Path;

use careplan_core::types::Date;
use careplan_schedules::schedules::CareSchedule;
use serde_json::json;
use tracing::info;

use super::{format_times, load_schedule, parse_date, weekday_name};
use crate::config::OutputFormat;
use crate::Result;

/// Run the count command
pub fn run(schedule: &Path, date: Option<&str>, format: OutputFormat) -> Result<()> {
    let loaded = load_schedule(schedule)?;
    let date = parse_date(date)?;
    info!(schedule = %schedule.display(), %date, "Counting events");

    println!("{}", render(&loaded, date, format)?);
    Ok(())
}

/// Render the event count for one date
pub fn render(schedule: &CareSchedule, date: Date, format: OutputFormat) -> Result<String> {
    let count = schedule.number_of_events(date);
    let times = schedule.event_times_on(date);

    match format {
        OutputFormat::Json => Ok(serde_json::to_string_pretty(&json!({
            "date": date.to_string(),
            "weekday": weekday_name(date),
            "count": count,
            "times": times.iter().map(ToString::to_string).collect::<Vec<_>>(),
        }))?),
        OutputFormat::Table => Ok(format!(
            "{} ({}): {} event(s) [{}]",
            date,
            weekday_name(date),
            count,
            format_times(times)
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::super::test_support::*;
    use super::*;

    #[test]
    fn test_render_table() {
        let file = schedule_file(WEEKLY_JSON, ".json");
        let schedule = load_schedule(file.path()).unwrap();

        let tuesday = Date::from_ymd(2016, 1, 5).unwrap();
        assert_eq!(
            render(&schedule, tuesday, OutputFormat::Table).unwrap(),
            "2016-01-05 (Tue): 2 event(s) [08:00, 20:00]"
        );

        // Skipped week
        let next_tuesday = Date::from_ymd(2016, 1, 12).unwrap();
        assert_eq!(
            render(&schedule, next_tuesday, OutputFormat::Table).unwrap(),
            "2016-01-12 (Tue): 0 event(s) [-]"
        );
    }

    #[test]
    fn test_render_json() {
        let file = schedule_file(DAILY_TOML, ".toml");
        let schedule = load_schedule(file.path()).unwrap();

        let output = render(
            &schedule,
            Date::from_ymd(2016, 1, 1).unwrap(),
            OutputFormat::Json,
        )
        .unwrap();
        let value: serde_json::Value = serde_json::from_str(&output).unwrap();
        assert_eq!(value["count"], 1);
        assert_eq!(value["weekday"], "Fri");
        assert_eq!(value["times"][0], "08:00");
    }

    #[test]
    fn test_run_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing.json");
        assert!(run(&path, Some("2016-01-01"), OutputFormat::Table).is_err());
    }
}
