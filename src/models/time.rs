use chrono::NaiveDateTime;

/// Timestamp pattern accepted everywhere in the assistant: `YYYY-MM-DD HH:MM`.
pub const TIME_FORMAT: &str = "%Y-%m-%d %H:%M";

/// Port-local timestamp with minute resolution.
///
/// Laytime inputs are all expressed on the same implicit clock (the port's
/// local time), so this wraps `NaiveDateTime` and never performs timezone
/// conversion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct PortTime(NaiveDateTime);

impl PortTime {
    /// Parse a `YYYY-MM-DD HH:MM` timestamp (24-hour clock, no offset).
    pub fn parse(value: &str) -> Result<Self, chrono::ParseError> {
        NaiveDateTime::parse_from_str(value, TIME_FORMAT).map(Self)
    }

    /// Signed number of hours elapsed since `earlier`. Negative if `self`
    /// precedes `earlier`.
    pub fn hours_since(&self, earlier: &PortTime) -> f64 {
        (self.0 - earlier.0).num_minutes() as f64 / 60.0
    }
}

/// A time interval between two port-local timestamps.
///
/// `start <= end` is not enforced. Callers may supply inverted windows; an
/// inverted window has a negative duration and overlaps nothing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeWindow {
    pub start: PortTime,
    pub end: PortTime,
}

impl TimeWindow {
    pub fn new(start: PortTime, end: PortTime) -> Self {
        Self { start, end }
    }

    /// Signed duration of this window in hours.
    pub fn duration_hours(&self) -> f64 {
        self.end.hours_since(&self.start)
    }

    /// Length of the clamped intersection with `other`, in hours.
    ///
    /// Returns exactly 0 when the windows are disjoint, touch only at an
    /// endpoint, or either window is inverted. Never negative.
    pub fn overlap_hours(&self, other: &TimeWindow) -> f64 {
        let overlap_start = self.start.max(other.start);
        let overlap_end = self.end.min(other.end);
        if overlap_end > overlap_start {
            overlap_end.hours_since(&overlap_start)
        } else {
            0.0
        }
    }
}
