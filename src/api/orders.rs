//! Order lifecycle operations.

use std::fmt::Display;

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};

use super::client::{ApiClient, ApiResponse};
use crate::{Error, Result};

/// Wire format for delivery confirmation timestamps.
const DELIVERY_DATE_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

impl ApiClient {
    /// Mark an order as shipped.
    ///
    /// Marking an order as shipped sends the invoice to the consumer and
    /// releases the transaction amount for payout to the merchant.
    /// `courier` is the delivering company (`DHL`, `EMS`, `Fedex`,
    /// `POSTCZ`, `POSTPL`, `UPS`, or a custom name agreed with the
    /// gateway).
    pub async fn mark_shipped(
        &self,
        transaction_id: impl Display,
        courier: &str,
        tracking_number: impl Display,
    ) -> Result<ApiResponse> {
        let command = format!("{courier}:{tracking_number}");
        self.execute_command("/MarkOrderShipped", &transaction_id.to_string(), &command)
            .await
    }

    /// Confirm an order as delivered.
    ///
    /// Some merchant contracts require the delivery confirmation; sending
    /// it is recommended even where optional. `date` must be a date/time
    /// string: `2014-12-28 17:05:28`, the RFC 3339 `T` form, or a bare
    /// `2014-12-28` (midnight is assumed). Anything else fails with
    /// [`Error::InvalidArgument`] before any network activity.
    pub async fn confirm_delivered(
        &self,
        transaction_id: impl Display,
        date: &str,
    ) -> Result<ApiResponse> {
        let delivered_at = parse_delivery_date(date)?;
        let command = delivered_at.format(DELIVERY_DATE_FORMAT).to_string();
        self.execute_command("/ConfirmDelivery", &transaction_id.to_string(), &command)
            .await
    }
}

fn parse_delivery_date(date: &str) -> Result<NaiveDateTime> {
    NaiveDateTime::parse_from_str(date, DELIVERY_DATE_FORMAT)
        .or_else(|_| NaiveDateTime::parse_from_str(date, "%Y-%m-%dT%H:%M:%S"))
        .or_else(|_| {
            NaiveDate::parse_from_str(date, "%Y-%m-%d").map(|d| d.and_time(NaiveTime::MIN))
        })
        .map_err(|_| Error::InvalidArgument {
            message: format!("expecting `date` to be a date/time value, got `{date}`"),
        })
}
