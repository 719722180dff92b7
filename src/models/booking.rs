use std::fmt;

use chrono::{DateTime, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};

use super::car::Car;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BookingStatus {
    Confirmed,
    Ongoing,
    Completed,
    Cancelled,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PaymentMethod {
    Card,
    Upi,
    Netbanking,
    Wallet,
}

impl PaymentMethod {
    pub const ALL: [PaymentMethod; 4] = [
        PaymentMethod::Card,
        PaymentMethod::Upi,
        PaymentMethod::Netbanking,
        PaymentMethod::Wallet,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            PaymentMethod::Card => "card",
            PaymentMethod::Upi => "upi",
            PaymentMethod::Netbanking => "netbanking",
            PaymentMethod::Wallet => "wallet",
        }
    }

    /// Label and providers listed next to the method in the payment view.
    pub fn label(&self) -> (&'static str, &'static str) {
        match self {
            PaymentMethod::Card => ("Credit/Debit Card", "Visa, Mastercard, RuPay"),
            PaymentMethod::Upi => ("UPI", "PhonePe, GPay, Paytm"),
            PaymentMethod::Netbanking => ("Net Banking", "All major banks"),
            PaymentMethod::Wallet => ("Digital Wallet", "Paytm, Amazon Pay"),
        }
    }
}

impl fmt::Display for PaymentMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PaymentStatus {
    Pending,
    Completed,
    Failed,
}

/// Itemised charge for a booking.
///
/// `total == base_amount + gst + insurance + convenience - discount` always holds
/// for breakdowns built by [`crate::rental::pricing::breakdown`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentBreakdown {
    pub base_amount: i64,
    pub gst: i64,
    pub insurance: i64,
    pub convenience: i64,
    pub discount: i64,
    pub total: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Payment {
    pub id: String,
    pub method: PaymentMethod,
    pub status: PaymentStatus,
    pub transaction_id: String,
    pub breakdown: PaymentBreakdown,
}

/// Booking data carried from the booking form to the payment step.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BookingDraft {
    pub car_id: String,
    pub car: Car,
    pub user_id: String,
    #[serde(with = "form_datetime")]
    pub start_date: NaiveDateTime,
    #[serde(with = "form_datetime")]
    pub end_date: NaiveDateTime,
    pub total_hours: u32,
    pub total_amount: i64,
    pub pickup_location: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Booking {
    pub id: String,
    pub car_id: String,
    pub car: Car,
    pub user_id: String,
    #[serde(with = "form_datetime")]
    pub start_date: NaiveDateTime,
    #[serde(with = "form_datetime")]
    pub end_date: NaiveDateTime,
    pub total_hours: u32,
    pub total_amount: i64,
    pub status: BookingStatus,
    pub pickup_location: String,
    pub created_at: DateTime<Utc>,
    pub payment: Payment,
}

/// Booking form timestamps: `2024-01-01T10:00`, the date and time inputs
/// joined with `T`. Seconds are accepted on input and dropped on output.
pub mod form_datetime {
    use chrono::{NaiveDateTime, ParseResult};
    use serde::{de, Deserialize, Deserializer, Serializer};

    const FORMAT: &str = "%Y-%m-%dT%H:%M";
    const FORMAT_WITH_SECONDS: &str = "%Y-%m-%dT%H:%M:%S";

    pub fn parse(raw: &str) -> ParseResult<NaiveDateTime> {
        NaiveDateTime::parse_from_str(raw, FORMAT)
            .or_else(|_| NaiveDateTime::parse_from_str(raw, FORMAT_WITH_SECONDS))
    }

    pub fn serialize<S: Serializer>(
        value: &NaiveDateTime,
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        serializer.collect_str(&value.format(FORMAT))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<NaiveDateTime, D::Error> {
        let raw = String::deserialize(deserializer)?;
        parse(&raw).map_err(|e| de::Error::custom(format!("invalid timestamp {:?}: {}", raw, e)))
    }

    /// Same format for optional fields; `null` or a missing field is `None`.
    pub mod option {
        use chrono::NaiveDateTime;
        use serde::{de, Deserialize, Deserializer};

        pub fn deserialize<'de, D: Deserializer<'de>>(
            deserializer: D,
        ) -> Result<Option<NaiveDateTime>, D::Error> {
            match Option::<String>::deserialize(deserializer)? {
                Some(raw) => super::parse(&raw)
                    .map(Some)
                    .map_err(|e| de::Error::custom(format!("invalid timestamp {:?}: {}", raw, e))),
                None => Ok(None),
            }
        }
    }
}

impl Booking {
    /// Materialise a confirmed booking from a draft and its settled payment.
    pub fn confirm(draft: BookingDraft, created_at: DateTime<Utc>, payment: Payment) -> Self {
        Self {
            id: format!("BK{}", created_at.timestamp_millis()),
            car_id: draft.car_id,
            car: draft.car,
            user_id: draft.user_id,
            start_date: draft.start_date,
            end_date: draft.end_date,
            total_hours: draft.total_hours,
            total_amount: draft.total_amount,
            status: BookingStatus::Confirmed,
            pickup_location: draft.pickup_location,
            created_at,
            payment,
        }
    }
}
