//! Wall-clock snapshot and the taskbar clock text.

use crate::model::{Language, TimeFormat};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
/// Local calendar date and time of day, read once per tick.
pub struct ClockSnapshot {
    pub year: u32,
    pub month: u32,
    pub day: u32,
    pub hour: u32,
    pub minute: u32,
    pub second: u32,
}

impl ClockSnapshot {
    pub fn now() -> Self {
        #[cfg(target_arch = "wasm32")]
        {
            let date = js_sys::Date::new_0();
            return Self {
                year: date.get_full_year(),
                month: date.get_month() + 1,
                day: date.get_date(),
                hour: date.get_hours(),
                minute: date.get_minutes(),
                second: date.get_seconds(),
            };
        }

        #[cfg(not(target_arch = "wasm32"))]
        {
            Self {
                year: 1970,
                month: 1,
                day: 1,
                hour: 0,
                minute: 0,
                second: 0,
            }
        }
    }
}

/// Hour and minute, plus seconds when `show_seconds` is set. The 12-hour form shows midnight and
/// noon as 12 and appends AM/PM.
pub fn format_clock_time(
    snapshot: ClockSnapshot,
    time_format: TimeFormat,
    show_seconds: bool,
) -> String {
    let (hour, suffix) = match time_format {
        TimeFormat::TwentyFourHour => (snapshot.hour, None),
        TimeFormat::TwelveHour => {
            let hour = match snapshot.hour % 12 {
                0 => 12,
                hour => hour,
            };
            (hour, Some(if snapshot.hour >= 12 { "PM" } else { "AM" }))
        }
    };
    let mut text = format!("{hour:02}:{:02}", snapshot.minute);
    if show_seconds {
        text.push_str(&format!(":{:02}", snapshot.second));
    }
    if let Some(suffix) = suffix {
        text.push(' ');
        text.push_str(suffix);
    }
    text
}

/// Short date in the language's customary order.
pub fn format_clock_date(snapshot: ClockSnapshot, language: Language) -> String {
    match language {
        Language::En => format!("{}/{}/{}", snapshot.month, snapshot.day, snapshot.year),
        Language::Tr => format!(
            "{:02}.{:02}.{:04}",
            snapshot.day, snapshot.month, snapshot.year
        ),
    }
}
