use crate::models::{CyclingStats, StravaActivity};

const RIDE_TYPES: [&str; 2] = ["Ride", "VirtualRide"];

pub fn is_ride(activity: &StravaActivity) -> bool {
    RIDE_TYPES.contains(&activity.kind.as_str())
}

/// Sums ride metrics; non-ride activities are ignored and missing fields count as zero.
pub fn calculate_stats_from_activities(activities: &[StravaActivity]) -> CyclingStats {
    activities
        .iter()
        .filter(|activity| is_ride(activity))
        .fold(CyclingStats::default(), |mut stats, ride| {
            let elevation = ride.total_elevation_gain.unwrap_or_default();
            stats.count += 1;
            stats.distance += ride.distance.unwrap_or_default();
            stats.moving_time += ride.moving_time.unwrap_or_default();
            stats.elapsed_time += ride.elapsed_time.unwrap_or_default();
            stats.elevation_gain += elevation;
            stats.total_elevation_gain += elevation;
            stats
        })
}

/// Moving time rounded to the nearest whole hour.
pub fn rounded_hours(moving_seconds: f64) -> i64 {
    (moving_seconds / 3600.0).round() as i64
}

/// Meters to kilometers, two decimals.
pub fn format_distance(meters: f64) -> String {
    format!("{:.2}", meters / 1000.0)
}

/// Whole hours, truncated.
pub fn format_time(seconds: f64) -> i64 {
    (seconds / 3600.0).floor() as i64
}

pub fn format_elevation(meters: f64) -> i64 {
    meters.round() as i64
}

pub fn format_duration(seconds: f64) -> String {
    let total = seconds.max(0.0) as i64;
    let hours = total / 3600;
    let minutes = (total % 3600) / 60;
    if hours > 0 {
        format!("{hours}h {minutes}min")
    } else {
        format!("{minutes}min")
    }
}
