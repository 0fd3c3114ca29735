use chrono::Utc;
use serde_json::json;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{broadcast, Mutex, RwLock};
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;

use crate::models::{InsightsReport, WellbeingReading};
use crate::services::{insights::InsightsAggregator, wellbeing};
use crate::sources::{aggregate_or_empty, entries_or_empty, JournalSource};

/// Latest published results. `None` until the first refresh of that kind
/// completes, which readers should treat as "no insights yet".
#[derive(Clone, Default)]
pub struct Snapshots {
    insights: Arc<RwLock<Option<InsightsReport>>>,
    wellbeing: Arc<RwLock<Option<WellbeingReading>>>,
}

impl Snapshots {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn insights(&self) -> Option<InsightsReport> {
        self.insights.read().await.clone()
    }

    pub async fn wellbeing(&self) -> Option<WellbeingReading> {
        self.wellbeing.read().await.clone()
    }

    /// Replaces the published report as a whole.
    pub async fn publish_insights(&self, report: InsightsReport) {
        *self.insights.write().await = Some(report);
    }

    /// Replaces the published reading, returning the one it superseded.
    pub async fn publish_wellbeing(&self, reading: WellbeingReading) -> Option<WellbeingReading> {
        self.wellbeing.write().await.replace(reading)
    }
}

#[derive(Debug, Clone)]
pub struct RefreshSettings {
    pub insights_interval: Duration,
    pub wellbeing_interval: Duration,
}

impl Default for RefreshSettings {
    fn default() -> Self {
        Self {
            insights_interval: Duration::from_secs(300),
            wellbeing_interval: Duration::from_secs(30),
        }
    }
}

/// Fetches from a source, recomputes, and publishes into `Snapshots`.
///
/// Clones share the same locks, so at most one insights refresh and one
/// wellbeing refresh run at any time no matter who triggers them.
pub struct Refresher<S> {
    source: Arc<S>,
    aggregator: InsightsAggregator,
    snapshots: Snapshots,
    notify: Option<broadcast::Sender<String>>,
    insights_lock: Arc<Mutex<()>>,
    wellbeing_lock: Arc<Mutex<()>>,
}

impl<S> Clone for Refresher<S> {
    fn clone(&self) -> Self {
        Self {
            source: self.source.clone(),
            aggregator: self.aggregator,
            snapshots: self.snapshots.clone(),
            notify: self.notify.clone(),
            insights_lock: self.insights_lock.clone(),
            wellbeing_lock: self.wellbeing_lock.clone(),
        }
    }
}

impl<S: JournalSource> Refresher<S> {
    pub fn new(source: Arc<S>, aggregator: InsightsAggregator, snapshots: Snapshots) -> Self {
        Self {
            source,
            aggregator,
            snapshots,
            notify: None,
            insights_lock: Arc::new(Mutex::new(())),
            wellbeing_lock: Arc::new(Mutex::new(())),
        }
    }

    /// Also announce each completed refresh on `tx` as a JSON message.
    pub fn with_broadcast(mut self, tx: broadcast::Sender<String>) -> Self {
        self.notify = Some(tx);
        self
    }

    pub fn snapshots(&self) -> &Snapshots {
        &self.snapshots
    }

    pub async fn refresh_insights_once(&self) -> InsightsReport {
        let _guard = self.insights_lock.lock().await;

        let entries = entries_or_empty(self.source.as_ref()).await;
        let aggregate = aggregate_or_empty(self.source.as_ref()).await;
        let report = self.aggregator.generate(&entries, &aggregate, Utc::now());

        self.snapshots.publish_insights(report.clone()).await;

        tracing::info!(
            total_entries = report.insights.total_entries,
            average_mood = report.insights.average_mood_score,
            "Insights refreshed"
        );
        self.announce(json!({ "type": "insights_refreshed", "report": report }));

        report
    }

    pub async fn refresh_wellbeing_once(&self) -> WellbeingReading {
        let _guard = self.wellbeing_lock.lock().await;

        let aggregate = aggregate_or_empty(self.source.as_ref()).await;
        let reading = wellbeing::evaluate(&aggregate, Utc::now());

        let previous = self
            .snapshots
            .publish_wellbeing(reading.clone())
            .await
            .map(|r| r.state);

        if previous != Some(reading.state) {
            tracing::info!(
                state = reading.state.as_str(),
                previous = previous.map(|s| s.as_str()),
                "Wellbeing state changed"
            );
        }
        self.announce(json!({ "type": "wellbeing_refreshed", "reading": reading }));

        reading
    }

    fn announce(&self, msg: serde_json::Value) {
        if let Some(tx) = self.notify.as_ref() {
            // No subscribers is fine
            let _ = tx.send(msg.to_string());
        }
    }
}

/// Handle to the two periodic refresh tasks.
///
/// Missed ticks are skipped, so a refresh that overruns its interval is
/// followed by exactly one more rather than a burst.
pub struct RefreshService {
    insights_task: Option<JoinHandle<()>>,
    wellbeing_task: Option<JoinHandle<()>>,
}

impl RefreshService {
    pub fn start<S: JournalSource>(refresher: Refresher<S>, settings: RefreshSettings) -> Self {
        let insights = refresher.clone();
        let insights_task = tokio::spawn(async move {
            let mut interval = tokio::time::interval(settings.insights_interval);
            interval.set_missed_tick_behavior(MissedTickBehavior::Skip);
            loop {
                interval.tick().await;
                insights.refresh_insights_once().await;
            }
        });

        let wellbeing_task = tokio::spawn(async move {
            let mut interval = tokio::time::interval(settings.wellbeing_interval);
            interval.set_missed_tick_behavior(MissedTickBehavior::Skip);
            loop {
                interval.tick().await;
                refresher.refresh_wellbeing_once().await;
            }
        });

        tracing::info!(
            insights_secs = settings.insights_interval.as_secs_f64(),
            wellbeing_secs = settings.wellbeing_interval.as_secs_f64(),
            "Refresh service started"
        );

        Self {
            insights_task: Some(insights_task),
            wellbeing_task: Some(wellbeing_task),
        }
    }

    /// Cancels both tasks and waits for them to finish. Nothing is
    /// published once this returns.
    pub async fn stop(mut self) {
        let tasks: Vec<JoinHandle<()>> = [self.insights_task.take(), self.wellbeing_task.take()]
            .into_iter()
            .flatten()
            .collect();
        for task in &tasks {
            task.abort();
        }
        for task in tasks {
            if let Err(e) = task.await {
                if !e.is_cancelled() {
                    tracing::error!(error = %e, "Refresh task failed");
                }
            }
        }
        tracing::info!("Refresh service stopped");
    }
}

impl Drop for RefreshService {
    fn drop(&mut self) {
        for task in [self.insights_task.take(), self.wellbeing_task.take()]
            .into_iter()
            .flatten()
        {
            task.abort();
        }
    }
}
