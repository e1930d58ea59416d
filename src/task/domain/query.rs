//! Ordering and paging rules for reading the pending set.

use super::{FieldViolation, Task, ValidationErrors};
use std::cmp::Ordering;

/// Column the pending list is ordered by.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum PendingSortKey {
    /// Order by effort estimate.
    EstimatedMinutes,
    /// Order by submission time.
    #[default]
    SubmittedAt,
}

impl PendingSortKey {
    /// Returns the wire and column name of the key.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::EstimatedMinutes => "estimated_minutes",
            Self::SubmittedAt => "submitted_at",
        }
    }
}

impl TryFrom<&str> for PendingSortKey {
    type Error = FieldViolation;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value.trim().to_ascii_lowercase().as_str() {
            "estimated_minutes" => Ok(Self::EstimatedMinutes),
            "submitted_at" => Ok(Self::SubmittedAt),
            _ => Err(FieldViolation::SortBy),
        }
    }
}

/// Sort direction.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum SortOrder {
    /// Smallest first.
    #[default]
    Asc,
    /// Largest first.
    Desc,
}

impl SortOrder {
    /// Returns the wire name of the direction.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Asc => "asc",
            Self::Desc => "desc",
        }
    }

    /// Applies the direction to an ascending comparison result.
    #[must_use]
    pub const fn apply(self, ordering: Ordering) -> Ordering {
        match self {
            Self::Asc => ordering,
            Self::Desc => ordering.reverse(),
        }
    }
}

impl TryFrom<&str> for SortOrder {
    type Error = FieldViolation;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value.trim().to_ascii_lowercase().as_str() {
            "asc" => Ok(Self::Asc),
            "desc" => Ok(Self::Desc),
            _ => Err(FieldViolation::Order),
        }
    }
}

/// Positive cap on the number of pending tasks returned.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PendingLimit(u32);

impl PendingLimit {
    /// Limit applied when the caller does not choose one.
    pub const DEFAULT: Self = Self(10);

    /// Creates a validated limit.
    ///
    /// # Errors
    ///
    /// Returns [`FieldViolation::Limit`] when `value` is zero.
    pub const fn new(value: u32) -> Result<Self, FieldViolation> {
        if value == 0 {
            return Err(FieldViolation::Limit);
        }
        Ok(Self(value))
    }

    /// Returns the limit.
    #[must_use]
    pub const fn value(self) -> u32 {
        self.0
    }
}

impl Default for PendingLimit {
    fn default() -> Self {
        Self::DEFAULT
    }
}

impl TryFrom<&str> for PendingLimit {
    type Error = FieldViolation;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        let parsed = value
            .trim()
            .parse::<u32>()
            .map_err(|_| FieldViolation::Limit)?;
        Self::new(parsed)
    }
}

/// Shape of a pending-list read.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct PendingTaskQuery {
    sort_by: PendingSortKey,
    order: SortOrder,
    limit: PendingLimit,
}

impl PendingTaskQuery {
    /// Creates a query from validated parts.
    #[must_use]
    pub const fn new(sort_by: PendingSortKey, order: SortOrder, limit: PendingLimit) -> Self {
        Self {
            sort_by,
            order,
            limit,
        }
    }

    /// Parses optional caller parameters, applying defaults for absent ones.
    ///
    /// Blank values count as absent.
    ///
    /// # Errors
    ///
    /// Returns every invalid parameter as [`ValidationErrors`].
    pub fn from_params(
        sort_by: Option<&str>,
        order: Option<&str>,
        limit: Option<&str>,
    ) -> Result<Self, ValidationErrors> {
        let mut errors = ValidationErrors::new();
        let parsed_sort = errors.collect(
            present(sort_by).map_or(Ok(PendingSortKey::default()), PendingSortKey::try_from),
        );
        let parsed_order =
            errors.collect(present(order).map_or(Ok(SortOrder::default()), SortOrder::try_from));
        let parsed_limit = errors.collect(
            present(limit).map_or(Ok(PendingLimit::default()), PendingLimit::try_from),
        );

        match (parsed_sort, parsed_order, parsed_limit) {
            (Some(key), Some(direction), Some(cap)) => Ok(Self::new(key, direction, cap)),
            _ => Err(errors),
        }
    }

    /// Returns the sort key.
    #[must_use]
    pub const fn sort_by(&self) -> PendingSortKey {
        self.sort_by
    }

    /// Returns the sort direction.
    #[must_use]
    pub const fn order(&self) -> SortOrder {
        self.order
    }

    /// Returns the result cap.
    #[must_use]
    pub const fn limit(&self) -> PendingLimit {
        self.limit
    }

    /// Compares two tasks the way the pending list orders them.
    ///
    /// Ties on the requested key fall back to ascending external identifier
    /// regardless of direction.
    #[must_use]
    pub fn compare(&self, left: &Task, right: &Task) -> Ordering {
        let primary = match self.sort_by {
            PendingSortKey::EstimatedMinutes => {
                left.estimated_minutes().cmp(&right.estimated_minutes())
            }
            PendingSortKey::SubmittedAt => left.submitted_at().cmp(&right.submitted_at()),
        };
        self.order
            .apply(primary)
            .then_with(|| left.external_id().cmp(right.external_id()))
    }
}

fn present(raw: Option<&str>) -> Option<&str> {
    raw.filter(|value| !value.trim().is_empty())
}

/// Orders tasks by processing priority: shortest estimate first, then
/// earliest submission, then external identifier.
#[must_use]
pub fn processing_priority(left: &Task, right: &Task) -> Ordering {
    left.estimated_minutes()
        .cmp(&right.estimated_minutes())
        .then_with(|| left.submitted_at().cmp(&right.submitted_at()))
        .then_with(|| left.external_id().cmp(right.external_id()))
}
