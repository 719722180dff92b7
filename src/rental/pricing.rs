use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use serde::Serialize;

use crate::models::PaymentBreakdown;

pub const GST_PERCENT: i64 = 18;
pub const INSURANCE_PERCENT: i64 = 5;
pub const CONVENIENCE_FEE: i64 = 25;
/// Reserved; no discounts are offered yet.
pub const DISCOUNT: i64 = 0;

const MILLIS_PER_HOUR: u64 = 60 * 60 * 1000;

/// Join a form's date and time fields into one wall-clock instant.
pub fn combine(date: Option<NaiveDate>, time: Option<NaiveTime>) -> Option<NaiveDateTime> {
    Some(date?.and_time(time?))
}

/// Billable hours between two instants, rounded up to the next whole hour.
///
/// Returns 0 when either endpoint is missing or the end is not after the
/// start. Callers treat 0 as "invalid duration".
pub fn rental_hours(start: Option<NaiveDateTime>, end: Option<NaiveDateTime>) -> u32 {
    let (Some(start), Some(end)) = (start, end) else {
        return 0;
    };

    let millis = (end - start).num_milliseconds();
    if millis <= 0 {
        return 0;
    }

    u32::try_from((millis as u64).div_ceil(MILLIS_PER_HOUR)).unwrap_or(u32::MAX)
}

/// Hours and base cost for a rental window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Quote {
    pub total_hours: u32,
    pub base_amount: i64,
}

impl Quote {
    pub fn new(start: Option<NaiveDateTime>, end: Option<NaiveDateTime>, price_per_hour: i64) -> Self {
        let total_hours = rental_hours(start, end);

        Self {
            total_hours,
            base_amount: i64::from(total_hours) * price_per_hour,
        }
    }

    pub fn is_valid(&self) -> bool {
        self.total_hours >= 1
    }
}

/// `round(amount * percent / 100)`, rounding halves away from zero.
fn percent_of(amount: i64, percent: i64) -> i64 {
    let scaled = amount * percent;
    if scaled >= 0 {
        (scaled + 50) / 100
    } else {
        -((-scaled + 50) / 100)
    }
}

/// Itemise the charge for a base amount.
///
/// Each line item is rounded on its own; the total is the sum of the
/// already-rounded parts.
pub fn breakdown(base_amount: i64) -> PaymentBreakdown {
    let gst = percent_of(base_amount, GST_PERCENT);
    let insurance = percent_of(base_amount, INSURANCE_PERCENT);

    PaymentBreakdown {
        base_amount,
        gst,
        insurance,
        convenience: CONVENIENCE_FEE,
        discount: DISCOUNT,
        total: base_amount + gst + insurance + CONVENIENCE_FEE - DISCOUNT,
    }
}
