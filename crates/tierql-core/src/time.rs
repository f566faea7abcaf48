use derive_more::{Add, AddAssign, Sub, SubAssign, Sum};
use serde::{Deserialize, Serialize};
use std::fmt;

const NANOS_PER_SECOND: i64 = 1_000_000_000;
const NANOS_PER_MILLISECOND: i64 = 1_000_000;

///
/// TimePoint
///
/// Signed nanosecond offset from the start of the owning recording.
/// Media time, not wall-clock time: two points are comparable only
/// within the same recording.
///

#[derive(
    Add,
    AddAssign,
    Clone,
    Copy,
    Debug,
    Default,
    Eq,
    Hash,
    Ord,
    PartialEq,
    PartialOrd,
    Serialize,
    Deserialize,
    Sub,
    SubAssign,
    Sum,
)]
pub struct TimePoint(i64);

impl TimePoint {
    pub const ZERO: Self = Self(0);

    #[must_use]
    pub const fn from_nanoseconds(nanos: i64) -> Self {
        Self(nanos)
    }

    #[must_use]
    pub const fn from_milliseconds(millis: i64) -> Self {
        Self(millis * NANOS_PER_MILLISECOND)
    }

    /// Rounds to the nearest nanosecond.
    #[must_use]
    #[allow(clippy::cast_possible_truncation, clippy::cast_precision_loss)]
    pub fn from_seconds(seconds: f64) -> Self {
        Self((seconds * NANOS_PER_SECOND as f64).round() as i64)
    }

    #[must_use]
    pub const fn as_nanoseconds(self) -> i64 {
        self.0
    }

    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub const fn as_seconds(self) -> f64 {
        self.0 as f64 / NANOS_PER_SECOND as f64
    }

    #[must_use]
    pub const fn abs(self) -> Self {
        Self(self.0.abs())
    }
}

impl fmt::Display for TimePoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        let abs = self.0.unsigned_abs();
        write!(
            f,
            "{sign}{}.{:09}",
            abs / NANOS_PER_SECOND.unsigned_abs(),
            abs % NANOS_PER_SECOND.unsigned_abs()
        )
    }
}

///
/// TimeSpan
///
/// Closed time interval `[start, end]`. Construction normalizes the
/// bounds so that `start <= end` always holds.
///

#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq, Serialize, Deserialize)]
pub struct TimeSpan {
    start: TimePoint,
    end: TimePoint,
}

impl TimeSpan {
    #[must_use]
    pub fn new(start: TimePoint, end: TimePoint) -> Self {
        if start <= end {
            Self { start, end }
        } else {
            Self {
                start: end,
                end: start,
            }
        }
    }

    #[must_use]
    pub fn from_seconds(start: f64, end: f64) -> Self {
        Self::new(TimePoint::from_seconds(start), TimePoint::from_seconds(end))
    }

    #[must_use]
    pub const fn start(&self) -> TimePoint {
        self.start
    }

    #[must_use]
    pub const fn end(&self) -> TimePoint {
        self.end
    }

    #[must_use]
    pub fn duration(&self) -> TimePoint {
        self.end - self.start
    }

    #[must_use]
    pub fn center(&self) -> TimePoint {
        TimePoint::from_nanoseconds(
            self.start.as_nanoseconds() + self.duration().as_nanoseconds() / 2,
        )
    }

    /// Closed-bound containment of a single point.
    #[must_use]
    pub fn contains(&self, t: TimePoint) -> bool {
        self.start <= t && t <= self.end
    }

    /// Closed-bound containment of a whole span.
    #[must_use]
    pub fn contains_span(&self, other: &Self) -> bool {
        self.contains(other.start) && self.contains(other.end)
    }

    /// Nonzero temporal overlap. Spans that merely touch at a boundary
    /// do not overlap.
    #[must_use]
    pub fn overlaps(&self, other: &Self) -> bool {
        self.start < other.end && other.start < self.end
    }
}

impl fmt::Display for TimeSpan {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}, {}]", self.start, self.end)
    }
}
