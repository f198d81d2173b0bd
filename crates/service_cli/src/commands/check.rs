//! Check command implementation
//!
//! Validates a schedule file and prints a summary of its definition.

use std::path::Path;

use careplan_schedules::schedules::{codec, CareSchedule};
use tracing::info;

use super::{format_times, load_schedule};
use crate::config::OutputFormat;
use crate::Result;

const WEEKDAY_NAMES: [&str; 7] = [
    "Sunday",
    "Monday",
    "Tuesday",
    "Wednesday",
    "Thursday",
    "Friday",
    "Saturday",
];

/// Run the check command
pub fn run(schedule: &Path, format: OutputFormat) -> Result<()> {
    info!(schedule = %schedule.display(), "Checking schedule file");
    let loaded = load_schedule(schedule)?;

    println!("{}", render(&loaded, format)?);
    info!("Schedule is valid");
    Ok(())
}

/// Render a summary of the schedule definition
pub fn render(schedule: &CareSchedule, format: OutputFormat) -> Result<String> {
    if format == OutputFormat::Json {
        return Ok(codec::encode_json(schedule.spec())?);
    }

    let kind = schedule.kind();
    let mut lines = vec![
        format!("Kind:      {}", kind),
        format!("Start:     {}", schedule.start_time()),
        format!(
            "End:       {}",
            schedule
                .end_time()
                .map(|end| end.to_string())
                .unwrap_or_else(|| "(unbounded)".to_string())
        ),
        format!(
            "Cadence:   every {} {}(s)",
            u64::from(schedule.time_units_to_skip()) + 1,
            kind.unit_name()
        ),
    ];

    let times = schedule.times();
    if times.len() == WEEKDAY_NAMES.len() {
        for (name, list) in WEEKDAY_NAMES.iter().zip(times) {
            lines.push(format!("  {:<10} {}", name, format_times(list)));
        }
    } else {
        for list in times {
            lines.push(format!("  {:<10} {}", "Every day", format_times(list)));
        }
    }

    if !schedule.user_info().is_empty() {
        let keys: Vec<&str> = schedule.user_info().keys().collect();
        lines.push(format!("User info: {}", keys.join(", ")));
    }

    lines.push("OK".to_string());
    Ok(lines.join("\n"))
}
