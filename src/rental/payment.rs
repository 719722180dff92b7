use std::time::Duration;

use chrono::{DateTime, Utc};

use crate::models::{Payment, PaymentBreakdown, PaymentMethod, PaymentStatus};

/// A payment the session is waiting on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaymentRequest {
    /// Identifies this attempt; a result for any other attempt is stale.
    pub attempt: u64,
    pub method: PaymentMethod,
    pub breakdown: PaymentBreakdown,
    pub requested_at: DateTime<Utc>,
}

/// Settles a payment request. Implementations resolve exactly once.
#[allow(async_fn_in_trait)]
pub trait PaymentGateway {
    async fn settle(&self, request: &PaymentRequest) -> Payment;
}

/// Stand-in gateway: waits a fixed delay, then reports the payment completed.
#[derive(Debug, Clone)]
pub struct SimulatedGateway {
    delay: Duration,
}

impl SimulatedGateway {
    pub fn new(delay: Duration) -> Self {
        Self { delay }
    }
}

impl Default for SimulatedGateway {
    fn default() -> Self {
        Self::new(Duration::from_secs(2))
    }
}

impl PaymentGateway for SimulatedGateway {
    async fn settle(&self, request: &PaymentRequest) -> Payment {
        tracing::debug!(
            attempt = request.attempt,
            method = %request.method,
            total = request.breakdown.total,
            "Processing payment"
        );

        tokio::time::sleep(self.delay).await;

        // Ids carry the settlement time, one delay after the request.
        let settled_at = request.requested_at
            + chrono::Duration::from_std(self.delay).unwrap_or_else(|_| chrono::Duration::zero());
        let stamp = settled_at.timestamp_millis();
        Payment {
            id: format!("PAY{}", stamp),
            method: request.method,
            status: PaymentStatus::Completed,
            transaction_id: format!("TXN{}", stamp),
            breakdown: request.breakdown,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rental::pricing::breakdown;
    use chrono::TimeZone;

    #[tokio::test(start_paused = true)]
    async fn test_simulated_settlement_waits_then_completes() {
        let gateway = SimulatedGateway::new(Duration::from_secs(2));
        let request = PaymentRequest {
            attempt: 1,
            method: PaymentMethod::Upi,
            breakdown: breakdown(1500),
            requested_at: Utc.with_ymd_and_hms(2024, 1, 1, 9, 0, 0).unwrap(),
        };

        let started = tokio::time::Instant::now();
        let payment = gateway.settle(&request).await;

        assert!(started.elapsed() >= Duration::from_secs(2));
        assert_eq!(payment.status, PaymentStatus::Completed);
        assert_eq!(payment.method, PaymentMethod::Upi);
        assert_eq!(payment.breakdown.total, 1870);
        assert_eq!(payment.id, "PAY1704099602000");
        assert_eq!(payment.transaction_id, "TXN1704099602000");
    }
}
