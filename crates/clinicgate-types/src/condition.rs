//! Time-windowed conditions and the query-time evaluation context.
//!
//! The scenario uses exactly one condition kind, `active_window`: a tuple
//! guarded by it contributes to a decision only while the query context's
//! `current_time` lies inside `[start_time, end_time]`, both ends inclusive.

use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Renders an instant the way the decision service expects timestamps:
/// ISO-8601 UTC with second precision and a `Z` suffix.
pub fn iso_utc(t: DateTime<Utc>) -> String {
    t.to_rfc3339_opts(SecondsFormat::Secs, true)
}

fn serialize_iso<S: Serializer>(t: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(&iso_utc(*t))
}

fn deserialize_iso<'de, D: Deserializer<'de>>(deserializer: D) -> Result<DateTime<Utc>, D::Error> {
    let s = String::deserialize(deserializer)?;
    DateTime::parse_from_rfc3339(&s)
        .map(|t| t.with_timezone(&Utc))
        .map_err(serde::de::Error::custom)
}

// ============================================================================
// TimeWindow
// ============================================================================

/// A closed interval of wall-clock time, `[start, end]` inclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeWindow {
    #[serde(
        rename = "start_time",
        serialize_with = "serialize_iso",
        deserialize_with = "deserialize_iso"
    )]
    pub start: DateTime<Utc>,

    #[serde(
        rename = "end_time",
        serialize_with = "serialize_iso",
        deserialize_with = "deserialize_iso"
    )]
    pub end: DateTime<Utc>,
}

impl TimeWindow {
    pub fn new(start: DateTime<Utc>, end: DateTime<Utc>) -> Self {
        Self { start, end }
    }

    /// Whether `instant` falls inside the window. Both bounds are inclusive,
    /// matching the decision service's `active_window` semantics.
    pub fn contains(&self, instant: DateTime<Utc>) -> bool {
        self.start <= instant && instant <= self.end
    }
}

// ============================================================================
// Condition
// ============================================================================

/// A named predicate attached to a relation tuple, evaluated by the decision
/// service against the query-time context.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "name", content = "context", rename_all = "snake_case")]
pub enum Condition {
    /// Active only while `current_time` lies inside the window.
    ActiveWindow(TimeWindow),
}

impl Condition {
    /// The window guarding this condition.
    pub fn window(&self) -> &TimeWindow {
        match self {
            Condition::ActiveWindow(w) => w,
        }
    }
}

// ============================================================================
// EvaluationContext
// ============================================================================

/// The query-time context sent with every check and list-objects request.
///
/// The instant is fixed once per run; downstream code never reads the wall
/// clock, so the same configuration replays to the same decisions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct EvaluationContext {
    #[serde(
        serialize_with = "serialize_iso",
        deserialize_with = "deserialize_iso"
    )]
    pub current_time: DateTime<Utc>,
}

impl EvaluationContext {
    pub fn at(current_time: DateTime<Utc>) -> Self {
        Self { current_time }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};
    use test_case::test_case;

    fn t0() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 6, 15, 12, 0, 0).unwrap()
    }

    fn appointment_window() -> TimeWindow {
        TimeWindow::new(t0() - Duration::hours(1), t0() + Duration::hours(2))
    }

    #[test_case(Duration::zero(), true; "at reference instant")]
    #[test_case(-Duration::hours(1), true; "inclusive lower bound")]
    #[test_case(Duration::hours(2), true; "inclusive upper bound")]
    #[test_case(-Duration::hours(2), false; "before the window")]
    #[test_case(Duration::hours(3), false; "after the window")]
    fn window_bounds_are_inclusive(offset: Duration, expected: bool) {
        assert_eq!(appointment_window().contains(t0() + offset), expected);
    }

    #[test]
    fn condition_serializes_to_named_predicate_with_context() {
        let cond = Condition::ActiveWindow(appointment_window());
        let json = serde_json::to_value(&cond).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "name": "active_window",
                "context": {
                    "start_time": "2025-06-15T11:00:00Z",
                    "end_time": "2025-06-15T14:00:00Z",
                }
            })
        );
    }

    #[test]
    fn evaluation_context_serializes_current_time() {
        let ctx = EvaluationContext::at(t0());
        let json = serde_json::to_value(ctx).unwrap();
        assert_eq!(
            json,
            serde_json::json!({ "current_time": "2025-06-15T12:00:00Z" })
        );
    }

    #[test]
    fn iso_utc_uses_second_precision() {
        assert_eq!(iso_utc(t0()), "2025-06-15T12:00:00Z");
    }
}
