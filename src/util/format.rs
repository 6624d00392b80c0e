/// Human-readable distance: meters below one kilometer.
#[must_use]
pub fn format_distance(km: f64) -> String {
    if km < 1.0 {
        let meters = (km * 1000.0) as i64;
        format!("{meters} m")
    } else {
        format!("{km:.1} km")
    }
}

/// Human-readable duration from minutes.
#[must_use]
pub fn format_duration(minutes: f64) -> String {
    if minutes < 60.0 {
        return format!("{} min", minutes as i64);
    }
    let hours = (minutes / 60.0) as i64;
    let mins = (minutes % 60.0) as i64;
    if mins == 0 {
        format!("{hours} hr")
    } else {
        format!("{hours} hr {mins} min")
    }
}

/// Display color for a classifier confidence value.
#[must_use]
pub fn confidence_color(confidence: f64) -> &'static str {
    if confidence > 0.85 {
        "green"
    } else if confidence > 0.70 {
        "orange"
    } else {
        "red"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn distance_below_one_km_in_meters() {
        assert_eq!(format_distance(0.35), "350 m");
        assert_eq!(format_distance(12.34), "12.3 km");
    }

    #[test]
    fn duration_rolls_into_hours() {
        assert_eq!(format_duration(45.0), "45 min");
        assert_eq!(format_duration(60.0), "1 hr");
        assert_eq!(format_duration(95.0), "1 hr 35 min");
    }

    #[test]
    fn confidence_color_bands() {
        assert_eq!(confidence_color(0.9), "green");
        assert_eq!(confidence_color(0.75), "orange");
        assert_eq!(confidence_color(0.5), "red");
    }
}
