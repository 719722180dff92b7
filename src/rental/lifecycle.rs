//! The booking session: city choice, catalog, booking form, payment and
//! confirmation, driven by discrete user events.
//!
//! ```text
//! Idle --select_city--> Browsing --book--> BookingForm --submit--> PaymentForm --pay--> Confirmed
//!   ^                      |  ^  \--book (no user)--> AuthRequired --login--^              |
//!   +----change_city-------+  +---------------cancel / dismiss_confirmation-----------------+
//! ```

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};

use crate::error::BookingError;
use crate::models::{
    Booking, BookingDraft, Car, Payment, PaymentBreakdown, PaymentMethod, PaymentStatus, User,
};
use crate::rental::auth::{AuthProvider, LoginData};
use crate::rental::catalog::{filter_cars, CatalogQuery, CategoryFilter, SortKey};
use crate::rental::clock::Clock;
use crate::rental::payment::{PaymentGateway, PaymentRequest};
use crate::rental::persistence::{BookingStore, KeyValueStore};
use crate::rental::pricing::{self, Quote};

type Result<T> = std::result::Result<T, BookingError>;

/// Where the session currently is.
#[derive(Debug, Clone, PartialEq)]
pub enum Stage {
    /// No city chosen yet.
    Idle,
    /// Catalog for the chosen city is on screen.
    Browsing,
    /// A car was picked while signed out; waiting for login.
    AuthRequired { car: Car },
    BookingForm { car: Car },
    PaymentForm {
        draft: BookingDraft,
        breakdown: PaymentBreakdown,
        /// Attempt number of the payment being settled, if any.
        processing: Option<u64>,
    },
    Confirmed { booking: Booking },
}

impl Stage {
    pub fn name(&self) -> &'static str {
        match self {
            Stage::Idle => "idle",
            Stage::Browsing => "browsing",
            Stage::AuthRequired { .. } => "awaiting login",
            Stage::BookingForm { .. } => "on the booking form",
            Stage::PaymentForm { .. } => "on the payment form",
            Stage::Confirmed { .. } => "showing a confirmation",
        }
    }

    /// The car this stage is about, if any.
    pub fn selected_car(&self) -> Option<&Car> {
        match self {
            Stage::AuthRequired { car } | Stage::BookingForm { car } => Some(car),
            Stage::PaymentForm { draft, .. } => Some(&draft.car),
            _ => None,
        }
    }
}

/// Raw booking form input. Empty fields are `None`.
#[derive(Debug, Clone, Default)]
pub struct BookingForm {
    pub start_date: Option<NaiveDate>,
    pub start_time: Option<NaiveTime>,
    pub end_date: Option<NaiveDate>,
    pub end_time: Option<NaiveTime>,
    pub pickup_location: String,
}

impl BookingForm {
    pub fn start(&self) -> Option<NaiveDateTime> {
        pricing::combine(self.start_date, self.start_time)
    }

    pub fn end(&self) -> Option<NaiveDateTime> {
        pricing::combine(self.end_date, self.end_time)
    }

    /// Live estimate shown while the form is being filled.
    pub fn quote(&self, car: &Car) -> Quote {
        Quote::new(self.start(), self.end(), car.price_per_hour)
    }

    /// Check the form against its input bounds and return the quote.
    pub fn validate(&self, car: &Car, today: NaiveDate) -> Result<Quote> {
        if let Some(start_date) = self.start_date {
            if start_date < today {
                return Err(BookingError::StartDateInPast);
            }
            if self.end_date.is_some_and(|end_date| end_date < start_date) {
                return Err(BookingError::EndDateBeforeStart);
            }
        }

        let quote = self.quote(car);
        if !quote.is_valid() {
            return Err(BookingError::InvalidDuration);
        }

        if self.pickup_location.trim().is_empty() {
            return Err(BookingError::MissingPickupLocation);
        }

        Ok(quote)
    }
}

/// One user's booking session.
///
/// Owns the booking list and selected city; both are written through to the
/// store on every change. Storage write failures are logged and never block
/// a transition.
pub struct BookingSession<S, A, C> {
    store: BookingStore<S>,
    auth: A,
    clock: C,
    city: Option<String>,
    stage: Stage,
    bookings: Vec<Booking>,
    attempts: u64,
}

impl<S, A, C> BookingSession<S, A, C>
where
    S: KeyValueStore,
    A: AuthProvider,
    C: Clock,
{
    /// Resume from whatever the store holds.
    pub fn restore(store: S, auth: A, clock: C) -> Self {
        let store = BookingStore::new(store);
        let city = store.load_city();
        let bookings = store.load_bookings();

        tracing::debug!(
            city = city.as_deref().unwrap_or("-"),
            bookings = bookings.len(),
            "Session restored"
        );

        Self {
            stage: if city.is_some() { Stage::Browsing } else { Stage::Idle },
            store,
            auth,
            clock,
            city,
            bookings,
            attempts: 0,
        }
    }

    pub fn stage(&self) -> &Stage {
        &self.stage
    }

    pub fn city(&self) -> Option<&str> {
        self.city.as_deref()
    }

    pub fn bookings(&self) -> &[Booking] {
        &self.bookings
    }

    pub fn current_user(&self) -> Option<&User> {
        self.auth.current_user()
    }

    pub fn is_loading(&self) -> bool {
        self.auth.is_loading()
    }

    pub fn store(&self) -> &BookingStore<S> {
        &self.store
    }

    fn invalid(&self, event: &'static str) -> BookingError {
        BookingError::InvalidTransition {
            state: self.stage.name(),
            event,
        }
    }

    fn persist_bookings(&mut self) {
        if let Err(e) = self.store.save_bookings(&self.bookings) {
            tracing::warn!(error = %e, "Failed to persist bookings");
        }
    }

    pub fn select_city(&mut self, city: &str) -> Result<()> {
        if self.stage != Stage::Idle {
            return Err(self.invalid("select a city"));
        }

        if let Err(e) = self.store.save_city(city) {
            tracing::warn!(error = %e, "Failed to persist selected city");
        }

        tracing::info!(city, "City selected");
        self.city = Some(city.to_string());
        self.stage = Stage::Browsing;
        Ok(())
    }

    /// Drop the chosen city and any booking in progress.
    pub fn change_city(&mut self) -> Result<()> {
        if self.stage == Stage::Idle {
            return Err(self.invalid("change city"));
        }

        if let Err(e) = self.store.clear_city() {
            tracing::warn!(error = %e, "Failed to clear selected city");
        }

        tracing::info!(previous = self.city.as_deref().unwrap_or("-"), "City cleared");
        self.city = None;
        self.stage = Stage::Idle;
        Ok(())
    }

    /// Cars on offer in the session's city. Empty when no city is chosen.
    pub fn catalog(
        &self,
        cars: &[Car],
        search: &str,
        category: CategoryFilter,
        sort: SortKey,
    ) -> Vec<Car> {
        let Some(city) = &self.city else {
            return Vec::new();
        };

        let query = CatalogQuery {
            city: city.clone(),
            search: search.to_string(),
            category,
            sort,
        };
        filter_cars(cars, &query)
    }

    /// Start booking `car`; asks for login first when nobody is signed in.
    pub fn book(&mut self, car: Car) -> Result<()> {
        if self.stage != Stage::Browsing {
            return Err(self.invalid("book a car"));
        }

        self.stage = if self.auth.current_user().is_some() {
            Stage::BookingForm { car }
        } else {
            tracing::debug!(car_id = %car.id, "Login required before booking");
            Stage::AuthRequired { car }
        };
        Ok(())
    }

    /// Sign in; a booking waiting on login resumes with its car.
    pub fn login(&mut self, data: LoginData) -> User {
        let user = self.auth.login(data);

        let stage = std::mem::replace(&mut self.stage, Stage::Idle);
        self.stage = match stage {
            Stage::AuthRequired { car } => Stage::BookingForm { car },
            other => other,
        };
        user
    }

    /// Sign out. An open booking or payment form is closed.
    pub fn logout(&mut self) {
        self.auth.logout();

        if matches!(
            self.stage,
            Stage::BookingForm { .. } | Stage::PaymentForm { .. }
        ) {
            self.stage = Stage::Browsing;
        }
    }

    /// Close whichever modal is open, discarding its data.
    pub fn cancel(&mut self) -> Result<()> {
        match self.stage {
            Stage::AuthRequired { .. } | Stage::BookingForm { .. } | Stage::PaymentForm { .. } => {
                tracing::debug!(stage = self.stage.name(), "Booking cancelled");
                self.stage = Stage::Browsing;
                Ok(())
            }
            _ => Err(self.invalid("cancel")),
        }
    }

    /// Submit the booking form and move on to payment.
    pub fn submit_booking_form(&mut self, form: &BookingForm) -> Result<PaymentBreakdown> {
        let Stage::BookingForm { car } = &self.stage else {
            return Err(self.invalid("submit the booking form"));
        };
        let Some(user) = self.auth.current_user() else {
            return Err(self.invalid("submit the booking form"));
        };

        let quote = form.validate(car, self.clock.today())?;
        let (Some(start_date), Some(end_date)) = (form.start(), form.end()) else {
            return Err(BookingError::InvalidDuration);
        };

        let draft = BookingDraft {
            car_id: car.id.clone(),
            car: car.clone(),
            user_id: user.id.clone(),
            start_date,
            end_date,
            total_hours: quote.total_hours,
            total_amount: quote.base_amount,
            pickup_location: form.pickup_location.trim().to_string(),
        };
        let breakdown = pricing::breakdown(draft.total_amount);

        tracing::debug!(
            car_id = %draft.car_id,
            hours = draft.total_hours,
            total = breakdown.total,
            "Proceeding to payment"
        );

        self.stage = Stage::PaymentForm {
            draft,
            breakdown,
            processing: None,
        };
        Ok(breakdown)
    }

    /// Mark the payment form busy and hand out the request to settle.
    pub fn begin_payment(&mut self, method: PaymentMethod) -> Result<PaymentRequest> {
        if !matches!(self.stage, Stage::PaymentForm { .. }) {
            return Err(self.invalid("pay"));
        }

        let requested_at = self.clock.now();
        let attempt = self.attempts + 1;

        let Stage::PaymentForm {
            breakdown,
            processing,
            ..
        } = &mut self.stage
        else {
            return Err(BookingError::PaymentInProgress);
        };
        if processing.is_some() {
            return Err(BookingError::PaymentInProgress);
        }

        *processing = Some(attempt);
        self.attempts = attempt;

        Ok(PaymentRequest {
            attempt,
            method,
            breakdown: *breakdown,
            requested_at,
        })
    }

    /// Apply a settled payment.
    ///
    /// Returns `Ok(None)` when the result is stale because the payment view
    /// was closed (or the payment restarted) after the request went out.
    pub fn complete_payment(
        &mut self,
        request: &PaymentRequest,
        payment: Payment,
    ) -> Result<Option<Booking>> {
        let Stage::PaymentForm { processing, .. } = &mut self.stage else {
            tracing::debug!(attempt = request.attempt, "Discarding payment for closed view");
            return Ok(None);
        };
        if *processing != Some(request.attempt) {
            tracing::debug!(attempt = request.attempt, "Discarding stale payment");
            return Ok(None);
        }

        if payment.status != PaymentStatus::Completed {
            *processing = None;
            tracing::warn!(payment_id = %payment.id, "Payment was not completed");
            return Err(BookingError::PaymentDeclined);
        }

        let draft = match std::mem::replace(&mut self.stage, Stage::Browsing) {
            Stage::PaymentForm { draft, .. } => draft,
            other => {
                self.stage = other;
                return Ok(None);
            }
        };

        let booking = Booking::confirm(draft, self.clock.now(), payment);
        tracing::info!(
            booking_id = %booking.id,
            transaction_id = %booking.payment.transaction_id,
            total = booking.payment.breakdown.total,
            "Booking confirmed"
        );

        self.bookings.push(booking.clone());
        self.persist_bookings();
        self.stage = Stage::Confirmed {
            booking: booking.clone(),
        };
        Ok(Some(booking))
    }

    /// Pay with `method` through `gateway` and confirm the booking.
    pub async fn pay<G: PaymentGateway>(
        &mut self,
        method: PaymentMethod,
        gateway: &G,
    ) -> Result<Option<Booking>> {
        let request = self.begin_payment(method)?;
        let payment = gateway.settle(&request).await;
        self.complete_payment(&request, payment)
    }

    /// Close the confirmation and return to the catalog.
    pub fn dismiss_confirmation(&mut self) -> Result<()> {
        if !matches!(self.stage, Stage::Confirmed { .. }) {
            return Err(self.invalid("dismiss the confirmation"));
        }

        self.stage = Stage::Browsing;
        Ok(())
    }
}
