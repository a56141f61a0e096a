//! Text rendering for tool results.
//!
//! Every tool returns a text block, success or failure. Records render in
//! the order the API returned them; an empty result gets an explicit
//! "no data" message so it is never mistaken for a broken tool.

use oura_client::{DateRange, MetricCategory, MetricRecord, OuraError};

const SECONDS_PER_HOUR: f64 = 3600.0;

/// Render a fetched result set as a text block.
pub fn render_records(
    category: MetricCategory,
    range: &DateRange,
    records: &[MetricRecord],
) -> String {
    if records.is_empty() {
        return format!("No {} data found from {range}.", category.label());
    }

    let summaries: Vec<String> = records
        .iter()
        .map(|rec| match category {
            MetricCategory::Sleep => sleep_summary(rec),
            MetricCategory::DailyActivity => activity_summary(rec),
            MetricCategory::DailyReadiness => readiness_summary(rec),
            MetricCategory::HeartRate => heart_rate_summary(rec),
            MetricCategory::PersonalInfo => generic_summary(rec),
        })
        .collect();

    format!(
        "{} data from {range}:\n\n{}",
        capitalize(category.label()),
        summaries.join("\n---\n")
    )
}

/// Render an error as descriptive text naming the failure kind. Only error
/// kind, status and body flow through here; credentials never do.
pub fn render_error(err: &OuraError) -> String {
    match err {
        OuraError::Validation(msg) => format!("Invalid input: {msg}."),
        OuraError::Auth { status, .. } => {
            format!("Authentication failed (HTTP {status}). Check your Oura API token.")
        }
        OuraError::Transport(e) => format!("Network error reaching the Oura API: {e}."),
        OuraError::Api { status, body } if body.is_empty() => {
            format!("Oura API error (HTTP {status}).")
        }
        OuraError::Api { status, body } => format!("Oura API error (HTTP {status}): {body}."),
        OuraError::Config(msg) => format!("Configuration error: {msg}."),
    }
}

fn sleep_summary(rec: &MetricRecord) -> String {
    let mut lines = vec![format!("Date: {}", rec.day().unwrap_or("unknown"))];
    if let Some(score) = number(rec, "score") {
        lines.push(format!("Sleep Score: {score:.0}"));
    }
    if let Some(total) = number(rec, "total_sleep_duration") {
        lines.push(format!("Total Sleep: {:.1} hours", total / SECONDS_PER_HOUR));
    }
    if let Some(eff) = number(rec, "efficiency") {
        lines.push(format!("Sleep Efficiency: {eff:.0}%"));
    }

    let stages = [
        ("REM", "rem_sleep_duration"),
        ("Deep", "deep_sleep_duration"),
        ("Light", "light_sleep_duration"),
    ];
    let stage_lines: Vec<String> = stages
        .iter()
        .filter_map(|(label, field)| {
            number(rec, field)
                .map(|secs| format!("  - {label}: {:.1} hours", secs / SECONDS_PER_HOUR))
        })
        .collect();
    if !stage_lines.is_empty() {
        lines.push("Sleep Stages:".into());
        lines.extend(stage_lines);
    }
    lines.join("\n")
}

fn activity_summary(rec: &MetricRecord) -> String {
    let mut lines = vec![format!("Date: {}", rec.day().unwrap_or("unknown"))];
    if let Some(score) = number(rec, "score") {
        lines.push(format!("Activity Score: {score:.0}"));
    }
    if let Some(steps) = number(rec, "steps") {
        lines.push(format!("Steps: {steps:.0}"));
    }
    if let Some(active) = number(rec, "active_calories") {
        lines.push(format!("Active Calories: {active:.0}"));
    }
    if let Some(total) = number(rec, "total_calories") {
        lines.push(format!("Total Calories: {total:.0}"));
    }
    lines.join("\n")
}

fn readiness_summary(rec: &MetricRecord) -> String {
    let mut lines = vec![format!("Date: {}", rec.day().unwrap_or("unknown"))];
    if let Some(score) = number(rec, "score") {
        lines.push(format!("Readiness Score: {score:.0}/100"));
    }
    if let Some(dev) = number(rec, "temperature_deviation") {
        lines.push(format!("Temperature Deviation: {dev:.2} C"));
    }
    if let Some(contributors) = rec.get("contributors").and_then(|v| v.as_object()) {
        if !contributors.is_empty() {
            lines.push("Contributors:".into());
            for (name, value) in contributors {
                lines.push(format!("  - {name}: {value}"));
            }
        }
    }
    lines.join("\n")
}

fn heart_rate_summary(rec: &MetricRecord) -> String {
    let timestamp = rec
        .get("timestamp")
        .and_then(|v| v.as_str())
        .unwrap_or("unknown time");
    let bpm = number(rec, "bpm")
        .map(|b| format!("{b:.0} bpm"))
        .unwrap_or_else(|| "no reading".into());
    match rec.get("source").and_then(|v| v.as_str()) {
        Some(source) => format!("{timestamp}: {bpm} ({source})"),
        None => format!("{timestamp}: {bpm}"),
    }
}

fn generic_summary(rec: &MetricRecord) -> String {
    serde_json::to_string_pretty(&rec.0).unwrap_or_else(|_| rec.0.to_string())
}

fn number(rec: &MetricRecord, field: &str) -> Option<f64> {
    rec.get(field).and_then(serde_json::Value::as_f64)
}

fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
        None => String::new(),
    }
}
