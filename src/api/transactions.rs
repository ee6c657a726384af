//! Transaction operations.

use std::fmt::Display;

use super::client::{ApiClient, ApiResponse};
use crate::Result;

impl ApiClient {
    /// Refund a settled transaction, fully or partially.
    ///
    /// `amount` is given without a decimal point, e.g. `2098` refunds 20.98
    /// in `currency` (an ISO 4217 code). The gateway echoes the request and
    /// reports the outcome in the returned envelope.
    pub async fn refund(
        &self,
        transaction_id: impl Display,
        amount: u64,
        currency: &str,
    ) -> Result<ApiResponse> {
        let command = format!("{currency}{amount}");
        self.execute_command("/RefundTransaction", &transaction_id.to_string(), &command)
            .await
    }
}
