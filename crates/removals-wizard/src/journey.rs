//! Distance and duration conversion into the journey display strings.
//!
//! Distances are shown in miles with one decimal ("12.3 miles"), durations
//! as "H hr M min" or "M min".

use removals_api::types::TextValue;
use removals_api::DistanceElement;
use removals_core::Journey;

use crate::route::DirectionsRoute;

pub const KM_TO_MILES: f64 = 0.621_371;
pub const METRES_PER_MILE: f64 = 1609.34;

#[must_use]
pub fn format_miles(miles: f64) -> String {
    format!("{miles:.1} miles")
}

/// Rounds to whole minutes.
#[must_use]
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub fn format_duration(seconds: f64) -> String {
    let total_minutes = (seconds.max(0.0) / 60.0).round() as u64;
    let hours = total_minutes / 60;
    let minutes = total_minutes % 60;
    if hours > 0 {
        format!("{hours} hr {minutes} min")
    } else {
        format!("{minutes} min")
    }
}

/// Miles for a matrix `distance` field: metres from `value`, else the text.
#[must_use]
pub fn distance_miles(distance: &TextValue) -> Option<f64> {
    if let Some(metres) = distance.value {
        return Some(metres / 1000.0 * KM_TO_MILES);
    }
    parse_distance_text(&distance.text)
}

/// Seconds for a matrix `duration` field: `value`, else the text.
#[must_use]
pub fn duration_seconds(duration: &TextValue) -> Option<f64> {
    duration
        .value
        .or_else(|| parse_duration_text(&duration.text))
}

/// "19.8 km" / "850 m" / "12.3 mi" into miles.
#[must_use]
pub fn parse_distance_text(text: &str) -> Option<f64> {
    let text = text.trim().replace(',', "");
    let split = text
        .find(|c: char| !(c.is_ascii_digit() || c == '.'))
        .unwrap_or(text.len());
    let amount: f64 = text[..split].trim().parse().ok()?;
    match text[split..].trim().to_ascii_lowercase().as_str() {
        "km" | "kms" | "kilometres" | "kilometers" => Some(amount * KM_TO_MILES),
        "m" | "metres" | "meters" => Some(amount / 1000.0 * KM_TO_MILES),
        "mi" | "mile" | "miles" => Some(amount),
        _ => None,
    }
}

/// "1 hour 5 mins" / "2 days 3 hours" / "25 mins" into seconds.
#[must_use]
pub fn parse_duration_text(text: &str) -> Option<f64> {
    let tokens: Vec<&str> = text.split_whitespace().collect();
    let mut total = 0.0;
    let mut matched = false;
    for pair in tokens.chunks(2) {
        let [amount, unit] = pair else {
            return None;
        };
        let amount: f64 = amount.parse().ok()?;
        let factor = match unit.trim_end_matches(',').to_ascii_lowercase().as_str() {
            "day" | "days" => 86_400.0,
            "hour" | "hours" | "hr" | "hrs" => 3_600.0,
            "min" | "mins" | "minute" | "minutes" => 60.0,
            "sec" | "secs" | "second" | "seconds" => 1.0,
            _ => return None,
        };
        total += amount * factor;
        matched = true;
    }
    matched.then_some(total)
}

/// Journey from a distance-matrix element. `None` when the element is not
/// OK or carries no usable distance.
#[must_use]
pub fn journey_from_matrix(element: &DistanceElement, route: &str) -> Option<Journey> {
    if let Some(status) = element.status.as_deref() {
        if status != "OK" {
            return None;
        }
    }
    let miles = element.distance.as_ref().and_then(distance_miles)?;
    let duration = element
        .duration
        .as_ref()
        .and_then(duration_seconds)
        .map(format_duration);
    Some(Journey {
        distance: Some(format_miles(miles)),
        duration,
        route: Some(route.to_owned()),
    })
}

/// Journey from a directions route: legs are summed.
#[must_use]
pub fn journey_from_route(route: &DirectionsRoute, description: &str) -> Journey {
    let metres: f64 = route.legs.iter().map(|l| l.distance_metres).sum();
    let seconds: f64 = route.legs.iter().map(|l| l.duration_seconds).sum();
    Journey {
        distance: Some(format_miles(metres / METRES_PER_MILE)),
        duration: Some(format_duration(seconds)),
        route: Some(description.to_owned()),
    }
}

/// "A → stop → B", the route descriptor stored on the journey.
#[must_use]
pub fn describe_route(origin: &str, waypoints: &[String], destination: &str) -> String {
    std::iter::once(origin)
        .chain(waypoints.iter().map(String::as_str))
        .chain(std::iter::once(destination))
        .collect::<Vec<_>>()
        .join(" → ")
}
