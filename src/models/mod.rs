//! Records shared by the booking client and the catalog API.

pub mod booking;
pub mod car;
pub mod city;
pub mod user;

pub use booking::{
    Booking, BookingDraft, BookingStatus, Payment, PaymentBreakdown, PaymentMethod, PaymentStatus,
};
pub use car::{Car, Category, FuelType, Transmission};
pub use city::City;
pub use user::User;
