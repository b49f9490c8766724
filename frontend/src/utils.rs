use chrono::{DateTime, Datelike, Local, TimeZone};
use serde_json::Value;
use web_sys::HtmlInputElement;
use yew::prelude::*;

const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Alert timestamp in the viewer's time zone; the raw string if it is not RFC 3339.
pub fn local_time(timestamp: &str) -> String {
    format_timestamp(timestamp, &Local)
}

pub fn format_timestamp<Tz>(timestamp: &str, tz: &Tz) -> String
where
    Tz: TimeZone,
    Tz::Offset: std::fmt::Display,
{
    DateTime::parse_from_rfc3339(timestamp)
        .map(|t| t.with_timezone(tz).format(TIMESTAMP_FORMAT).to_string())
        .unwrap_or_else(|_| timestamp.to_owned())
}

pub fn current_year() -> i32 {
    Local::now().year()
}

pub fn footer_text(year: i32) -> String {
    format!("© {year} SmartHome Security")
}

/// Flattens a JSON object into label/value rows for display.
pub fn fields(value: &Value) -> Vec<(String, String)> {
    match value {
        Value::Object(map) => map
            .iter()
            .map(|(key, value)| (key.clone(), display_value(value)))
            .collect(),
        Value::Null => Vec::new(),
        other => vec![("value".to_owned(), display_value(other))],
    }
}

fn display_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Null => "N/A".to_owned(),
        other => other.to_string(),
    }
}

/// Keeps a text field's state in sync with what the user types.
pub fn bind_input(handle: &UseStateHandle<String>) -> Callback<InputEvent> {
    let handle = handle.clone();
    Callback::from(move |e: InputEvent| {
        handle.set(e.target_unchecked_into::<HtmlInputElement>().value());
    })
}
