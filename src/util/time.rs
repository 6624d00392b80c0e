use crate::config::PeakHoursConfig;
use chrono::{DateTime, Local, Timelike, Weekday};

/// Full English day name; chrono's `Display` gives the three-letter form.
pub fn day_name(day: Weekday) -> &'static str {
    match day {
        Weekday::Mon => "Monday",
        Weekday::Tue => "Tuesday",
        Weekday::Wed => "Wednesday",
        Weekday::Thu => "Thursday",
        Weekday::Fri => "Friday",
        Weekday::Sat => "Saturday",
        Weekday::Sun => "Sunday",
    }
}

/// Find a day name mentioned anywhere in already-lowercased text.
pub fn find_day_mention(lower: &str) -> Option<Weekday> {
    [
        Weekday::Mon,
        Weekday::Tue,
        Weekday::Wed,
        Weekday::Thu,
        Weekday::Fri,
        Weekday::Sat,
        Weekday::Sun,
    ]
    .into_iter()
    .find(|day| lower.contains(&day_name(*day).to_lowercase()))
}

/// Peak check plus a display label for the active window.
pub fn peak_status(now: DateTime<Local>, peaks: &PeakHoursConfig) -> (bool, String) {
    let hour = now.hour();
    if peaks.morning.contains(hour) {
        (
            true,
            format!(
                "Morning Peak ({}-{} AM)",
                peaks.morning.start,
                peaks.morning.end + 1
            ),
        )
    } else if peaks.evening.contains(hour) {
        (
            true,
            format!(
                "Evening Peak ({}-{} PM)",
                peaks.evening.start.saturating_sub(12),
                peaks.evening.end + 1 - 12
            ),
        )
    } else {
        (false, "Off-Peak".to_string())
    }
}

/// Coarse daypart label.
pub fn time_category(now: DateTime<Local>) -> &'static str {
    match now.hour() {
        5..12 => "morning",
        12..17 => "afternoon",
        17..21 => "evening",
        _ => "night",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn at(hour: u32) -> DateTime<Local> {
        Local
            .with_ymd_and_hms(2026, 1, 5, hour, 0, 0)
            .single()
            .expect("valid timestamp")
    }

    #[test]
    fn peak_status_labels() {
        let peaks = PeakHoursConfig::default();
        let (is_peak, label) = peak_status(at(9), &peaks);
        assert!(is_peak);
        assert!(label.contains("Morning"));

        let (is_peak, label) = peak_status(at(18), &peaks);
        assert!(is_peak);
        assert!(label.contains("Evening"));

        let (is_peak, label) = peak_status(at(14), &peaks);
        assert!(!is_peak);
        assert_eq!(label, "Off-Peak");
    }

    #[test]
    fn day_mentions() {
        assert_eq!(find_day_mention("traffic last friday evening"), Some(Weekday::Fri));
        assert_eq!(find_day_mention("peak hours please"), None);
        assert_eq!(day_name(Weekday::Wed), "Wednesday");
    }

    #[test]
    fn dayparts() {
        assert_eq!(time_category(at(6)), "morning");
        assert_eq!(time_category(at(13)), "afternoon");
        assert_eq!(time_category(at(19)), "evening");
        assert_eq!(time_category(at(23)), "night");
        assert_eq!(time_category(at(2)), "night");
    }
}
