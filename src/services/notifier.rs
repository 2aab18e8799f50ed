use std::time::Duration;

use reqwest::Client;
use rust_decimal::Decimal;
use serde_json::json;

use crate::error::{Error, Result};
use crate::models::Alert;

/// Turns a triggered alert into outbound notifications. Both channels
/// are attempted independently and failures never reach the caller —
/// the alert stays triggered whether delivery worked or not.
pub struct Notifier {
    http: Client,
}

impl Notifier {
    pub fn new(timeout: Duration) -> Self {
        Self {
            http: Client::builder()
                .timeout(timeout)
                .build()
                .unwrap_or_else(|_| Client::new()),
        }
    }

    pub async fn notify(&self, alert: &Alert, current_price: Decimal) {
        if let Some(url) = alert.webhook_url.as_deref() {
            match self.post_webhook(url, alert, current_price).await {
                Ok(()) => {
                    tracing::info!(alert_id = %alert.id, url, "webhook notification sent");
                }
                Err(e) => {
                    tracing::warn!(alert_id = %alert.id, error = %e, "webhook notification failed");
                }
            }
        }

        if let Some(email) = alert.email.as_deref() {
            // Placeholder channel: log the intent instead of sending.
            tracing::info!(alert_id = %alert.id, email, "email notification would be sent");
        }
    }

    async fn post_webhook(&self, url: &str, alert: &Alert, current_price: Decimal) -> Result<()> {
        let payload = json!({
            "alert_id": alert.id,
            "asset_type": alert.asset_type,
            "symbol": alert.symbol,
            "condition": alert.condition,
            "target_price": alert.target_price,
            "current_price": current_price,
            "triggered_at": alert.triggered_at,
            "message": format!(
                "Price alert triggered! {} is {} {:.2} (current: {:.2})",
                alert.symbol, alert.condition, alert.target_price, current_price
            ),
        });

        let res = self
            .http
            .post(url)
            .json(&payload)
            .send()
            .await
            .map_err(|e| Error::Dispatch(e.to_string()))?;

        if !res.status().is_success() {
            return Err(Error::Dispatch(format!(
                "webhook returned {}",
                res.status()
            )));
        }

        Ok(())
    }
}
