use std::fmt;

use chrono::NaiveDateTime;

use crate::models::Booking;

/// `₹` amount with Indian digit grouping: `1,870`, `1,23,456`.
pub fn format_rupees(amount: i64) -> String {
    let digits = amount.unsigned_abs().to_string();
    let sign = if amount < 0 { "-" } else { "" };

    if digits.len() <= 3 {
        return format!("{}₹{}", sign, digits);
    }

    let (head, tail) = digits.split_at(digits.len() - 3);
    let mut groups: Vec<&str> = Vec::new();
    let mut rest = head;
    while rest.len() > 2 {
        let (front, pair) = rest.split_at(rest.len() - 2);
        groups.push(pair);
        rest = front;
    }
    groups.push(rest);
    groups.reverse();

    format!("{}₹{},{}", sign, groups.join(","), tail)
}

fn long_date(at: &NaiveDateTime) -> String {
    at.format("%A, %-d %B %Y").to_string()
}

fn clock_time(at: &NaiveDateTime) -> String {
    at.format("%I:%M %P").to_string()
}

fn capitalise(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Printable summary of a confirmed booking.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Receipt {
    pub car: String,
    pub start_date: String,
    pub start_time: String,
    pub end_date: String,
    pub end_time: String,
    pub duration: String,
    pub pickup: String,
    pub total: String,
    pub method: String,
    pub transaction_id: String,
    pub booking_id: String,
}

impl From<&Booking> for Receipt {
    fn from(booking: &Booking) -> Self {
        Self {
            car: booking.car.display_name(),
            start_date: long_date(&booking.start_date),
            start_time: clock_time(&booking.start_date),
            end_date: long_date(&booking.end_date),
            end_time: clock_time(&booking.end_date),
            duration: format!("{} hours", booking.total_hours),
            pickup: booking.pickup_location.clone(),
            total: format_rupees(booking.payment.breakdown.total),
            method: capitalise(booking.payment.method.as_str()),
            transaction_id: booking.payment.transaction_id.clone(),
            booking_id: booking.id.clone(),
        }
    }
}

impl fmt::Display for Receipt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Booking Confirmed!")?;
        writeln!(f, "Car:            {}", self.car)?;
        writeln!(f, "Start:          {} {}", self.start_date, self.start_time)?;
        writeln!(f, "End:            {} {}", self.end_date, self.end_time)?;
        writeln!(f, "Duration:       {}", self.duration)?;
        writeln!(f, "Pickup:         {}", self.pickup)?;
        writeln!(f, "Total Amount:   {}", self.total)?;
        writeln!(f, "Payment Method: {}", self.method)?;
        writeln!(f, "Transaction ID: {}", self.transaction_id)?;
        write!(f, "Booking ID: {}", self.booking_id)
    }
}
