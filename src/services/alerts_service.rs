use chrono::Utc;
use mongodb::bson::oid::ObjectId;
use rust_decimal::Decimal;

use crate::AppState;
use crate::error::Result;
use crate::models::decimal;
use crate::models::{Alert, AlertCondition, AssetKind, CreateAlertRequest};

pub async fn list_alerts(state: &AppState) -> Result<Vec<Alert>> {
    state.store.list_alerts().await
}

pub async fn get_alert(state: &AppState, id: &str) -> Result<Option<Alert>> {
    state.store.get_alert(id).await
}

pub async fn create_alert(state: &AppState, req: CreateAlertRequest) -> Result<Alert> {
    let asset_type: AssetKind = req.asset_type.parse()?;
    let condition: AlertCondition = req.condition.parse()?;
    let target_price = decimal::fit(req.target_price, decimal::ALERT_TARGET)?;

    let alert = Alert {
        id: ObjectId::new().to_hex(),
        asset_type,
        symbol: req.symbol.trim().to_uppercase(),
        condition,
        target_price,
        is_active: true,
        is_triggered: false,
        triggered_at: None,
        created_at: Utc::now().timestamp(),
        webhook_url: req.webhook_url,
        email: req.email,
    };

    state.store.create_alert(&alert).await?;

    tracing::info!(
        alert_id = %alert.id,
        symbol = %alert.symbol,
        condition = %alert.condition,
        target = %alert.target_price,
        "created alert"
    );

    Ok(alert)
}

/// Idempotent: returns Ok(deleted?) and treats an absent id as success.
pub async fn delete_alert(state: &AppState, id: &str) -> Result<bool> {
    let deleted = state.store.delete_alert(id).await?;
    if deleted {
        tracing::info!(alert_id = %id, "deleted alert");
    }
    Ok(deleted)
}

/// Per-cycle tally. One entry per scanned alert: a trigger, a
/// no-price skip, an untouched miss, or an isolated failure.
#[derive(Debug, Default, Clone, Copy)]
pub struct EvaluationReport {
    pub checked: usize,
    pub triggered: usize,
    pub skipped: usize,
    pub failed: usize,
}

enum Outcome {
    Triggered,
    NotTriggered,
    NoPrice,
}

/// One evaluation cycle over every alert still armed. Failures are
/// isolated per alert; the scan always finishes its batch.
pub async fn evaluate_alerts(state: &AppState) -> Result<EvaluationReport> {
    let alerts = state.store.list_active_alerts().await?;
    tracing::info!(count = alerts.len(), "checking active alerts");

    let mut report = EvaluationReport {
        checked: alerts.len(),
        ..Default::default()
    };

    for alert in &alerts {
        match evaluate_one(state, alert).await {
            Ok(Outcome::Triggered) => report.triggered += 1,
            Ok(Outcome::NotTriggered) => {}
            Ok(Outcome::NoPrice) => report.skipped += 1,
            Err(e) => {
                report.failed += 1;
                tracing::error!(alert_id = %alert.id, error = %e, "error checking alert");
            }
        }
    }

    Ok(report)
}

/// Current price for the alert's asset, read straight from the store —
/// evaluation must not see cached pre-refresh data. An unknown symbol
/// is "no decision this cycle", not an error.
async fn resolve_current_price(state: &AppState, alert: &Alert) -> Result<Option<Decimal>> {
    match alert.asset_type {
        AssetKind::Crypto => Ok(state
            .store
            .get_crypto(&alert.symbol)
            .await?
            .map(|p| p.price_usd)),
        AssetKind::Stock => Ok(state
            .store
            .get_stock(&alert.symbol)
            .await?
            .map(|p| p.price)),
        AssetKind::Forex => Ok(state
            .store
            .get_forex("USD", &alert.symbol)
            .await?
            .map(|r| r.rate)),
    }
}

async fn evaluate_one(state: &AppState, alert: &Alert) -> Result<Outcome> {
    let Some(current) = resolve_current_price(state, alert).await? else {
        return Ok(Outcome::NoPrice);
    };

    // Closed comparisons: the boundary itself triggers.
    let hit = match alert.condition {
        AlertCondition::Above => current >= alert.target_price,
        AlertCondition::Below => current <= alert.target_price,
    };

    if !hit {
        return Ok(Outcome::NotTriggered);
    }

    let now = Utc::now().timestamp();
    if !state.store.mark_alert_triggered(&alert.id, now).await? {
        // A concurrent cycle won the compare-and-set.
        return Ok(Outcome::NotTriggered);
    }

    tracing::info!(
        alert_id = %alert.id,
        symbol = %alert.symbol,
        condition = %alert.condition,
        target = %alert.target_price,
        current = %current,
        "alert triggered"
    );

    let mut fired = alert.clone();
    fired.is_triggered = true;
    fired.is_active = false;
    fired.triggered_at = Some(now);

    // The trigger is already durable; delivery failures cannot undo it.
    state.notifier.notify(&fired, current).await;

    Ok(Outcome::Triggered)
}
