//! Calendar command implementation
//!
//! Lists per-date event counts over a date range.

use std::path::Path;

use careplan_core::types::Date;
use careplan_schedules::schedules::{ActivePeriod, CareSchedule};
use serde_json::json;
use tracing::info;

use super::{format_times, load_schedule, weekday_name};
use crate::config::OutputFormat;
use crate::{CliError, Result};

/// Run the calendar command
pub fn run(schedule: &Path, from: &str, to: &str, format: OutputFormat) -> Result<()> {
    let loaded = load_schedule(schedule)?;
    let from = Date::parse(from)?;
    let to = Date::parse(to)?;

    if to < from {
        return Err(CliError::InvalidArgument(format!(
            "--to {} is earlier than --from {}",
            to, from
        )));
    }

    info!(schedule = %schedule.display(), %from, %to, "Listing calendar");
    println!("{}", render(&loaded, from, to, format)?);
    Ok(())
}

/// Periods covering the listed dates, in order
fn periods_of(schedule: &CareSchedule, rows: &[(Date, usize)]) -> Vec<ActivePeriod> {
    let mut periods: Vec<ActivePeriod> = Vec::new();
    for (date, _) in rows {
        if periods.last().is_some_and(|period| period.contains(*date)) {
            continue;
        }
        if let Some(period) = schedule.period_containing(*date) {
            periods.push(period);
        }
    }
    periods
}

/// Render every date of `from..=to` that lies within the schedule
///
/// Multi-day periods get a header row in table output.
pub fn render(
    schedule: &CareSchedule,
    from: Date,
    to: Date,
    format: OutputFormat,
) -> Result<String> {
    let rows: Vec<(Date, usize)> = schedule.occurrences_between(from, to).collect();
    let total: usize = rows.iter().map(|(_, count)| count).sum();

    match format {
        OutputFormat::Json => {
            let days: Vec<_> = rows
                .iter()
                .map(|(date, count)| {
                    json!({
                        "date": date.to_string(),
                        "weekday": weekday_name(*date),
                        "count": count,
                        "times": schedule
                            .event_times_on(*date)
                            .iter()
                            .map(ToString::to_string)
                            .collect::<Vec<_>>(),
                    })
                })
                .collect();
            let periods: Vec<_> = periods_of(schedule, &rows)
                .iter()
                .map(|period| {
                    json!({
                        "index": period.index(),
                        "start": period.start().to_string(),
                        "end": period.end().to_string(),
                        "days": period.days(),
                        "active": period.is_active(),
                    })
                })
                .collect();
            Ok(serde_json::to_string_pretty(&json!({
                "from": from.to_string(),
                "to": to.to_string(),
                "total": total,
                "days": days,
                "periods": periods,
            }))?)
        }
        OutputFormat::Table => {
            let mut out = String::new();
            out.push_str("┌────────────┬─────┬───────┬────────────────────────┐\n");
            out.push_str("│ Date       │ Day │ Count │ Times                  │\n");
            out.push_str("├────────────┼─────┼───────┼────────────────────────┤\n");
            if rows.is_empty() {
                out.push_str("│ (no dates) │     │       │                        │\n");
            }
            let mut current: Option<ActivePeriod> = None;
            for (date, count) in &rows {
                if !current.is_some_and(|period| period.contains(*date)) {
                    current = schedule.period_containing(*date);
                    if let Some(period) = current.filter(|period| period.days() > 1) {
                        out.push_str(&format!("│ {:<49} │\n", period));
                    }
                }
                out.push_str(&format!(
                    "│ {} │ {} │ {:>5} │ {:<22} │\n",
                    date,
                    weekday_name(*date),
                    count,
                    format_times(schedule.event_times_on(*date))
                ));
            }
            out.push_str("└────────────┴─────┴───────┴────────────────────────┘\n");
            out.push_str(&format!("Total events: {}", total));
            Ok(out)
        }
    }
}
