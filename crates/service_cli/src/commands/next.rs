//! Next command implementation
//!
//! Finds the first date after a given date with at least one event.

use std::path::Path;

use careplan_core::types::Date;
use careplan_schedules::schedules::CareSchedule;
use serde_json::json;
use tracing::info;

use super::{format_times, load_schedule, parse_date, weekday_name};
use crate::config::OutputFormat;
use crate::Result;

/// Run the next command
pub fn run(schedule: &Path, after: Option<&str>, format: OutputFormat) -> Result<()> {
    let loaded = load_schedule(schedule)?;
    let after = parse_date(after)?;
    info!(schedule = %schedule.display(), %after, "Searching next event date");

    println!("{}", render(&loaded, after, format)?);
    Ok(())
}

/// Render the next event date after `after`
pub fn render(schedule: &CareSchedule, after: Date, format: OutputFormat) -> Result<String> {
    let next = schedule.next_event_date(after);

    match (format, next) {
        (OutputFormat::Json, Some(date)) => Ok(serde_json::to_string_pretty(&json!({
            "after": after.to_string(),
            "next": date.to_string(),
            "weekday": weekday_name(date),
            "count": schedule.number_of_events(date),
        }))?),
        (OutputFormat::Json, None) => Ok(serde_json::to_string_pretty(&json!({
            "after": after.to_string(),
            "next": null,
        }))?),
        (OutputFormat::Table, Some(date)) => Ok(format!(
            "Next events after {}: {} ({}) [{}]",
            after,
            date,
            weekday_name(date),
            format_times(schedule.event_times_on(date))
        )),
        (OutputFormat::Table, None) => Ok(format!("No events after {}", after)),
    }
}

#[cfg(test)]
mod tests {
    use super::super::test_support::*;
    use super::*;

    #[test]
    fn test_render_skips_inactive_week() {
        let file = schedule_file(WEEKLY_JSON, ".json");
        let schedule = load_schedule(file.path()).unwrap();

        // Thursday of week 0; week 1 is skipped
        let after = Date::from_ymd(2016, 1, 7).unwrap();
        assert_eq!(
            render(&schedule, after, OutputFormat::Table).unwrap(),
            "Next events after 2016-01-07: 2016-01-17 (Sun) [08:00]"
        );
    }

    #[test]
    fn test_render_past_end() {
        let file = schedule_file(WEEKLY_JSON, ".json");
        let schedule = load_schedule(file.path()).unwrap();

        let after = Date::from_ymd(2016, 2, 28).unwrap();
        assert_eq!(
            render(&schedule, after, OutputFormat::Table).unwrap(),
            "No events after 2016-02-28"
        );

        let output = render(&schedule, after, OutputFormat::Json).unwrap();
        let value: serde_json::Value = serde_json::from_str(&output).unwrap();
        assert!(value["next"].is_null());
    }
}
