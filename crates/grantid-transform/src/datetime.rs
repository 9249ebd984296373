//! Date re-rendering between strftime formats.

use std::fmt::Write;

use chrono::format::{Item, StrftimeItems};
use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DateError {
    #[error("unparseable date value `{value}`")]
    Unparseable { value: String },
    #[error("invalid date format `{format}`")]
    InvalidFormat { format: String },
}

/// Re-render a date value from `input_format` into `output_format`.
///
/// The value is parsed as a date first and as a date-time second, so
/// date-only formats keep working when sources add a time component. A
/// value that fails to parse but is a plausible bare year (fiscal-year
/// columns) renders as `YYYY-01-01`. Anything else is a per-field error:
/// the caller omits the field and keeps the record.
pub fn format_date(
    value: &str,
    input_format: Option<&str>,
    output_format: &str,
) -> Result<String, DateError> {
    let trimmed = value.trim();
    let output_items = parse_format(output_format)?;

    // Rendering always goes through a NaiveDateTime so time specifiers in
    // the output format stay valid for date-only inputs.
    if let Some(format) = input_format {
        let parsed = NaiveDate::parse_from_str(trimmed, format)
            .map(|date| date.and_time(NaiveTime::MIN))
            .or_else(|_| NaiveDateTime::parse_from_str(trimmed, format));
        if let Ok(datetime) = parsed {
            // A specifier the value cannot satisfy (a timezone on a naive
            // datetime) surfaces as a render error, not a panic.
            let mut rendered = String::new();
            write!(rendered, "{}", datetime.format_with_items(output_items.iter())).map_err(
                |_| DateError::InvalidFormat {
                    format: output_format.to_string(),
                },
            )?;
            return Ok(rendered);
        }
    }

    if let Ok(year) = trimmed.parse::<i32>() {
        if (1000..=9999).contains(&year) {
            return Ok(format!("{year}-01-01"));
        }
    }

    Err(DateError::Unparseable {
        value: trimmed.to_string(),
    })
}

/// Pre-parse a strftime format so rendering can never fail mid-write.
fn parse_format(format: &str) -> Result<Vec<Item<'_>>, DateError> {
    let items: Vec<Item<'_>> = StrftimeItems::new(format).collect();
    if items.iter().any(|item| matches!(item, Item::Error)) {
        return Err(DateError::InvalidFormat {
            format: format.to_string(),
        });
    }
    Ok(items)
}
