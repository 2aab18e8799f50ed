//! Background cycles: three refresh workers and the alert scan.
//!
//! Each operation is a zero-argument (given state) entry point that any
//! scheduler can invoke; `spawn_jobs` wires them to independent tokio
//! interval loops. A per-job guard skips a tick while the previous run
//! of the same job is still in flight.

use std::future::Future;
use std::time::Duration;

use tokio::sync::Mutex;
use tokio::time::{self, MissedTickBehavior};

use crate::AppState;
use crate::error::Result;
use crate::services::{alerts_service, crypto_service, forex_service, stocks_service};

#[derive(Default)]
pub struct JobGuards {
    crypto: Mutex<()>,
    stocks: Mutex<()>,
    forex: Mutex<()>,
    alerts: Mutex<()>,
}

pub fn spawn_jobs(state: &AppState) {
    spawn_cycle(
        "crypto-refresh",
        state.settings.crypto_refresh_secs,
        state.clone(),
        |s| async move { refresh_crypto(&s).await.map(|_| ()) },
    );
    spawn_cycle(
        "stock-refresh",
        state.settings.stock_refresh_secs,
        state.clone(),
        |s| async move { refresh_stocks(&s).await.map(|_| ()) },
    );
    spawn_cycle(
        "forex-refresh",
        state.settings.forex_refresh_secs,
        state.clone(),
        |s| async move { refresh_forex(&s).await.map(|_| ()) },
    );
    spawn_cycle(
        "alert-check",
        state.settings.alert_check_secs,
        state.clone(),
        |s| async move { evaluate_alerts(&s).await.map(|_| ()) },
    );
}

fn spawn_cycle<F, Fut>(name: &'static str, period_secs: u64, state: AppState, run: F)
where
    F: Fn(AppState) -> Fut + Send + 'static,
    Fut: Future<Output = Result<()>> + Send,
{
    tokio::spawn(async move {
        let mut interval = time::interval(Duration::from_secs(period_secs.max(1)));
        interval.set_missed_tick_behavior(MissedTickBehavior::Delay);

        loop {
            interval.tick().await;

            // Cycle failures are logged here, at the scheduler boundary;
            // the next tick retries.
            if let Err(e) = run(state.clone()).await {
                tracing::error!(job = name, error = %e, "cycle failed");
            }
        }
    });
}

pub async fn refresh_crypto(state: &AppState) -> Result<usize> {
    let Ok(_guard) = state.jobs.crypto.try_lock() else {
        tracing::warn!("crypto refresh still running, skipping this tick");
        return Ok(0);
    };

    tracing::info!("starting crypto price refresh");
    let updated = crypto_service::refresh_prices(state).await?;
    tracing::info!(updated, "crypto price refresh completed");
    Ok(updated)
}

pub async fn refresh_stocks(state: &AppState) -> Result<usize> {
    let Ok(_guard) = state.jobs.stocks.try_lock() else {
        tracing::warn!("stock refresh still running, skipping this tick");
        return Ok(0);
    };

    tracing::info!("starting stock price refresh");
    let updated = stocks_service::refresh_prices(state).await?;
    tracing::info!(updated, "stock price refresh completed");
    Ok(updated)
}

pub async fn refresh_forex(state: &AppState) -> Result<usize> {
    let Ok(_guard) = state.jobs.forex.try_lock() else {
        tracing::warn!("forex refresh still running, skipping this tick");
        return Ok(0);
    };

    tracing::info!("starting forex rate refresh");
    let updated = forex_service::refresh_rates(state).await?;
    tracing::info!(updated, "forex rate refresh completed");
    Ok(updated)
}

pub async fn evaluate_alerts(state: &AppState) -> Result<usize> {
    let Ok(_guard) = state.jobs.alerts.try_lock() else {
        tracing::warn!("alert check still running, skipping this tick");
        return Ok(0);
    };

    tracing::info!("starting alert check");
    let report = alerts_service::evaluate_alerts(state).await?;
    tracing::info!(
        checked = report.checked,
        triggered = report.triggered,
        skipped = report.skipped,
        failed = report.failed,
        "alert check completed"
    );
    Ok(report.triggered)
}
