//! ResetTicker - Background task that applies the daily quota reset.
//!
//! A long-running process may cross midnight without any user action. The
//! ticker calls [`QuotaLedger::check_and_reset`] on a fixed interval so the
//! refilled balance shows up without waiting for the next debit.
//!
//! ## Configuration
//!
//! | Setting | Default | Description |
//! |---------|---------|-------------|
//! | `interval` | 60s | How often to check the calendar day |
//!
//! Correctness depends only on `check_and_reset` being idempotent, not on
//! timer precision.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::watch;
use tokio::time::{self, MissedTickBehavior};

use super::QuotaLedger;

/// Configuration for the ResetTicker.
#[derive(Debug, Clone)]
pub struct ResetTickerConfig {
    /// How often to check for a day change.
    pub interval: Duration,
}

impl Default for ResetTickerConfig {
    fn default() -> Self {
        Self {
            interval: Duration::from_secs(60),
        }
    }
}

impl ResetTickerConfig {
    pub fn with_interval(mut self, interval: Duration) -> Self {
        self.interval = interval;
        self
    }
}

/// Background task that keeps the ledger's period current.
pub struct ResetTicker {
    ledger: Arc<QuotaLedger>,
    config: ResetTickerConfig,
}

impl ResetTicker {
    pub fn new(ledger: Arc<QuotaLedger>) -> Self {
        Self {
            ledger,
            config: ResetTickerConfig::default(),
        }
    }

    pub fn with_config(ledger: Arc<QuotaLedger>, config: ResetTickerConfig) -> Self {
        Self { ledger, config }
    }

    /// Run until the shutdown signal flips to `true` or its sender drops.
    pub async fn run(&self, mut shutdown: watch::Receiver<bool>) {
        let mut interval = time::interval(self.config.interval);
        interval.set_missed_tick_behavior(MissedTickBehavior::Delay);

        tracing::info!(interval_secs = self.config.interval.as_secs(), "Reset ticker started");

        loop {
            tokio::select! {
                changed = shutdown.changed() => {
                    if changed.is_err() || *shutdown.borrow() {
                        tracing::info!("Reset ticker stopped");
                        return;
                    }
                }

                _ = interval.tick() => {
                    self.tick_once().await;
                }
            }
        }
    }

    /// Run exactly one check. Returns true if the balance was refilled.
    pub async fn tick_once(&self) -> bool {
        self.ledger.check_and_reset().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::{FixedClock, InMemoryKeyValueStore};
    use crate::domain::quota::{ActionId, QuotaCatalog};
    use chrono::NaiveDate;

    async fn ledger(clock: Arc<FixedClock>) -> Arc<QuotaLedger> {
        Arc::new(
            QuotaLedger::initialize(
                Arc::new(InMemoryKeyValueStore::new()),
                clock,
                QuotaCatalog::default(),
            )
            .await,
        )
    }

    fn day() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 10, 19).unwrap()
    }

    #[tokio::test]
    async fn tick_once_refills_after_day_change() {
        let clock = Arc::new(FixedClock::new(day()));
        let ledger = ledger(clock.clone()).await;
        ledger.consume(ActionId::ExportPdf).await;

        let ticker = ResetTicker::new(ledger.clone());
        assert!(!ticker.tick_once().await);

        clock.advance_days(1);
        assert!(ticker.tick_once().await);
        assert_eq!(ledger.snapshot().await.remaining, 10);
    }

    #[tokio::test]
    async fn run_stops_on_shutdown_signal() {
        let clock = Arc::new(FixedClock::new(day()));
        let ticker = ResetTicker::with_config(
            ledger(clock).await,
            ResetTickerConfig::default().with_interval(Duration::from_millis(10)),
        );
        let (tx, rx) = watch::channel(false);

        let handle = tokio::spawn(async move { ticker.run(rx).await });
        tokio::time::sleep(Duration::from_millis(30)).await;
        tx.send(true).unwrap();

        tokio::time::timeout(Duration::from_secs(1), handle)
            .await
            .expect("ticker should stop")
            .unwrap();
    }

    #[tokio::test]
    async fn run_applies_reset_while_running() {
        let clock = Arc::new(FixedClock::new(day()));
        let ledger = ledger(clock.clone()).await;
        ledger.consume(ActionId::ExportPdf).await;

        let ticker = ResetTicker::with_config(
            ledger.clone(),
            ResetTickerConfig::default().with_interval(Duration::from_millis(10)),
        );
        let (tx, rx) = watch::channel(false);
        let handle = tokio::spawn(async move { ticker.run(rx).await });

        clock.advance_days(1);
        tokio::time::sleep(Duration::from_millis(50)).await;
        tx.send(true).unwrap();
        handle.await.unwrap();

        // Already refilled by the ticker
        assert!(!ledger.check_and_reset().await);
        assert_eq!(ledger.snapshot().await.remaining, 10);
    }
}
