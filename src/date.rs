use chrono::{Datelike, NaiveDateTime};

use crate::error::DateFormatError;

/// Input pattern for deadlines, e.g. `2/12/2019 1800`.
pub const INPUT_FORMAT: &str = "%d/%m/%Y %H%M";

/// Human form of [`INPUT_FORMAT`], shown when the user gets it wrong.
pub const INPUT_FORMAT_HINT: &str = "dd/mm/yyyy hhmm";

const OUTPUT_FORMAT: &str = "%B %Y, %-I:%M%p";

pub fn parse(input: &str) -> Result<NaiveDateTime, DateFormatError> {
    let trimmed = input.trim();
    if !has_input_shape(trimmed) {
        return Err(DateFormatError::Shape {
            input: input.to_string(),
        });
    }
    NaiveDateTime::parse_from_str(trimmed, INPUT_FORMAT).map_err(|source| DateFormatError::Value {
        input: input.to_string(),
        source,
    })
}

/// chrono is lenient about widths, signs and spacing; the input pattern is not.
/// Day and month take 1-2 digits, the year exactly 4, the time exactly 4, one space between.
fn has_input_shape(input: &str) -> bool {
    fn digits(s: &str, widths: std::ops::RangeInclusive<usize>) -> bool {
        widths.contains(&s.len()) && s.bytes().all(|b| b.is_ascii_digit())
    }

    let Some((date, time)) = input.split_once(' ') else {
        return false;
    };
    let mut fields = date.split('/');
    match (fields.next(), fields.next(), fields.next(), fields.next()) {
        (Some(day), Some(month), Some(year), None) => {
            digits(day, 1..=2) && digits(month, 1..=2) && digits(year, 4..=4) && digits(time, 4..=4)
        }
        _ => false,
    }
}

/// Renders as `2nd of December 2019, 6:00PM`.
pub fn format(at: &NaiveDateTime) -> String {
    let day = at.day();
    format!("{}{} of {}", day, ordinal_suffix(day), at.format(OUTPUT_FORMAT))
}

pub fn ordinal_suffix(day: u32) -> &'static str {
    match day {
        1 | 21 | 31 => "st",
        2 | 22 => "nd",
        3 | 23 => "rd",
        _ => "th",
    }
}
