//! Calendar arithmetic for the examination schedule.
//!
//! Required dates are computed with calendar-month addition anchored on the
//! hire date, and every required date is surrounded by a compliance window
//! of [`WINDOW_DAYS`] on each side.

use chrono::{Days, Months, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::models::ExamType;

/// Days allowed on either side of the required date.
pub const WINDOW_DAYS: u64 = 30;

/// How many days before the window opens a cycle is reported as upcoming.
pub const UPCOMING_NOTICE_DAYS: i64 = 30;

/// Adds calendar months to a date.
///
/// The day of month is preserved when it exists in the target month and is
/// clamped to the target month's last day otherwise. Returns `None` only if
/// the result falls outside the representable calendar.
///
/// # Example
///
/// ```
/// use exam_compliance::compliance::add_months;
/// use chrono::NaiveDate;
///
/// let hire = NaiveDate::from_ymd_opt(2023, 12, 31).unwrap();
/// assert_eq!(add_months(hire, 2), NaiveDate::from_ymd_opt(2024, 2, 29));
/// ```
pub fn add_months(date: NaiveDate, months: u32) -> Option<NaiveDate> {
    date.checked_add_months(Months::new(months))
}

/// Returns the required examination date for a scheduled exam type.
///
/// Returns `None` for [`ExamType::Other`], which has no schedule.
pub fn required_date(hire_date: NaiveDate, exam_type: ExamType) -> Option<NaiveDate> {
    add_months(hire_date, exam_type.month_offset()?)
}

/// The inclusive date range in which an examination satisfies a cycle.
///
/// # Example
///
/// ```
/// use exam_compliance::compliance::ComplianceWindow;
/// use chrono::NaiveDate;
///
/// let required = NaiveDate::from_ymd_opt(2025, 7, 15).unwrap();
/// let window = ComplianceWindow::around(required).unwrap();
///
/// assert_eq!(window.start, NaiveDate::from_ymd_opt(2025, 6, 15).unwrap());
/// assert_eq!(window.end, NaiveDate::from_ymd_opt(2025, 8, 14).unwrap());
/// assert!(window.contains(window.start));
/// assert!(window.contains(window.end));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComplianceWindow {
    /// First day an examination counts (inclusive).
    pub start: NaiveDate,
    /// Last day an examination counts (inclusive).
    pub end: NaiveDate,
}

impl ComplianceWindow {
    /// Builds the window of [`WINDOW_DAYS`] either side of a required date.
    pub fn around(required_date: NaiveDate) -> Option<Self> {
        Some(Self {
            start: required_date.checked_sub_days(Days::new(WINDOW_DAYS))?,
            end: required_date.checked_add_days(Days::new(WINDOW_DAYS))?,
        })
    }

    /// Checks if a date falls inside the window, inclusive of both ends.
    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start <= date && date <= self.end
    }

    /// Number of days from `today` until the window opens.
    ///
    /// Negative once the window has opened.
    pub fn days_until_start(&self, today: NaiveDate) -> i64 {
        self.start.signed_duration_since(today).num_days()
    }
}
