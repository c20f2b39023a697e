//! Route request bookkeeping.
//!
//! Every distance or directions request gets a fresh [`RouteRequestId`].
//! Only the latest request's first OK result is accepted; anything else is
//! dropped, so a journey write-back can never start another round.

use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RouteRequestId(u64);

impl fmt::Display for RouteRequestId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "route#{}", self.0)
    }
}

#[derive(Debug, Default)]
pub struct RouteTracker {
    issued: u64,
    current: Option<RouteRequestId>,
    resolved: bool,
}

impl RouteTracker {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Issues a new request id, superseding any outstanding one.
    pub fn begin(&mut self) -> RouteRequestId {
        self.issued += 1;
        let id = RouteRequestId(self.issued);
        self.current = Some(id);
        self.resolved = false;
        id
    }

    /// Claims the result slot for `id`. True at most once per request, and
    /// only for the latest one.
    pub fn accept(&mut self, id: RouteRequestId) -> bool {
        if self.current != Some(id) || self.resolved {
            return false;
        }
        self.resolved = true;
        true
    }

    #[must_use]
    pub fn current(&self) -> Option<RouteRequestId> {
        self.current
    }
}

/// Status reported by the routing collaborator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DirectionsStatus {
    Ok,
    ZeroResults,
    NotFound,
    Other(String),
}

impl From<&str> for DirectionsStatus {
    fn from(s: &str) -> Self {
        match s.trim().to_ascii_uppercase().as_str() {
            "OK" => Self::Ok,
            "ZERO_RESULTS" => Self::ZeroResults,
            "NOT_FOUND" => Self::NotFound,
            other => Self::Other(other.to_owned()),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RouteLeg {
    pub distance_metres: f64,
    pub duration_seconds: f64,
}

/// One route: legs run pickup → stops → delivery.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DirectionsRoute {
    pub legs: Vec<RouteLeg>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_result_wins() {
        let mut tracker = RouteTracker::new();
        let id = tracker.begin();
        assert!(tracker.accept(id));
        assert!(!tracker.accept(id));
        assert_eq!(tracker.current(), Some(id));
    }

    #[test]
    fn superseded_request_is_ignored() {
        let mut tracker = RouteTracker::new();
        let stale = tracker.begin();
        let fresh = tracker.begin();
        assert!(stale < fresh);
        assert!(!tracker.accept(stale));
        assert!(tracker.accept(fresh));
    }

    #[test]
    fn unknown_id_before_any_request() {
        let mut tracker = RouteTracker::new();
        let mut other = RouteTracker::new();
        let id = other.begin();
        assert!(!tracker.accept(id));
        assert_eq!(tracker.current(), None);
    }

    #[test]
    fn status_parses_case_insensitively() {
        assert_eq!(DirectionsStatus::from("ok"), DirectionsStatus::Ok);
        assert_eq!(
            DirectionsStatus::from("ZERO_RESULTS"),
            DirectionsStatus::ZeroResults
        );
        assert_eq!(
            DirectionsStatus::from("OVER_QUERY_LIMIT"),
            DirectionsStatus::Other("OVER_QUERY_LIMIT".to_owned())
        );
    }
}
