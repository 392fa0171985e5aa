//! Booking data shapes shared with the backend API
//!
//! Only the shapes the routes and pages refer to. Booking rules, payment
//! and availability all live behind the backend.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::navigation::RouteError;

/// Date format used in URLs and API payloads
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Reservation lifecycle as reported by the backend
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BookingStatus {
    /// Awaiting host or payment confirmation
    Pending,
    /// Confirmed by the host
    Confirmed,
    /// Guest has checked in
    CheckedIn,
    /// Stay finished
    Completed,
    /// Cancelled by guest, host or admin
    Cancelled,
}

impl BookingStatus {
    /// Whether the booking can still change
    pub fn is_active(&self) -> bool {
        matches!(self, BookingStatus::Pending | BookingStatus::Confirmed | BookingStatus::CheckedIn)
    }

    /// Badge label
    pub fn label(&self) -> &'static str {
        match self {
            BookingStatus::Pending => "Pending",
            BookingStatus::Confirmed => "Confirmed",
            BookingStatus::CheckedIn => "Checked in",
            BookingStatus::Completed => "Completed",
            BookingStatus::Cancelled => "Cancelled",
        }
    }
}

/// Check-in and check-out dates of a stay
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct StayDates {
    /// First night
    pub check_in: NaiveDate,
    /// Departure day, strictly after `check_in`
    pub check_out: NaiveDate,
}

impl StayDates {
    /// Create a date range, rejecting empty or inverted ranges
    pub fn new(check_in: NaiveDate, check_out: NaiveDate) -> Result<Self, RouteError> {
        if check_out <= check_in {
            return Err(RouteError::InvalidDateRange {
                check_in: check_in.format(DATE_FORMAT).to_string(),
                check_out: check_out.format(DATE_FORMAT).to_string(),
            });
        }
        Ok(Self { check_in, check_out })
    }

    /// Parse `YYYY-MM-DD` dates
    pub fn parse(check_in: &str, check_out: &str) -> Result<Self, RouteError> {
        Self::new(parse_date(check_in)?, parse_date(check_out)?)
    }

    /// Number of nights
    pub fn nights(&self) -> i64 {
        (self.check_out - self.check_in).num_days()
    }
}

fn parse_date(s: &str) -> Result<NaiveDate, RouteError> {
    NaiveDate::parse_from_str(s, DATE_FORMAT).map_err(|_| RouteError::InvalidDate(s.to_string()))
}
