// src/state/store.rs
use std::fmt;
use std::sync::Arc;

use crate::analysis::{AnalysisPayload, AnalysisResult, SubReport};

/// What a subscriber sees: the complete new snapshot plus the changed fields.
#[derive(Debug)]
pub struct StoreChange<'a> {
    pub generation: u64,
    pub snapshot: &'a Arc<AnalysisResult>,
    pub changed: &'a [SubReport],
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

type Callback = Box<dyn FnMut(&StoreChange<'_>)>;

struct Subscription {
    id: SubscriptionId,
    interests: Vec<SubReport>,
    callback: Callback,
}

impl Subscription {
    fn wants(&self, changed: &[SubReport]) -> bool {
        self.interests.is_empty() || changed.iter().any(|c| self.interests.contains(c))
    }
}

/// Holds exactly one generation of analysis output. Writes replace the whole
/// snapshot; readers get an immutable `Arc`.
pub struct AnalysisStore {
    snapshot: Arc<AnalysisResult>,
    generation: u64,
    next_subscription: u64,
    subscriptions: Vec<Subscription>,
}

impl fmt::Debug for AnalysisStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AnalysisStore")
            .field("generation", &self.generation)
            .field("loaded", &self.snapshot.is_loaded())
            .field("subscriptions", &self.subscriptions.len())
            .finish()
    }
}

impl Default for AnalysisStore {
    fn default() -> Self {
        Self::new()
    }
}

impl AnalysisStore {
    pub fn new() -> Self {
        Self {
            snapshot: Arc::new(AnalysisResult::default()),
            generation: 0,
            next_subscription: 0,
            subscriptions: Vec::new(),
        }
    }

    /// Replaces every sub-report with the value in `data`, or `Absent` where
    /// `data` has none. Subscribers run before this returns, and only after the
    /// new snapshot is in place.
    pub fn set_analysis_data(&mut self, data: Option<AnalysisPayload>) {
        let next = AnalysisResult::from(data.unwrap_or_default());
        let changed = self.snapshot.changed_reports(&next);
        if changed.is_empty() {
            log::trace!("Analysis data unchanged at generation {}", self.generation);
            return;
        }

        self.snapshot = Arc::new(next);
        self.generation += 1;
        log::debug!(
            "Store generation {}: changed [{}]",
            self.generation,
            changed.iter().map(|c| c.key()).collect::<Vec<_>>().join(", ")
        );

        let snapshot = Arc::clone(&self.snapshot);
        let change = StoreChange {
            generation: self.generation,
            snapshot: &snapshot,
            changed: &changed,
        };
        for subscription in self.subscriptions.iter_mut().filter(|s| s.wants(&changed)) {
            log::trace!("Notifying subscription {:?}", subscription.id);
            (subscription.callback)(&change);
        }
    }

    pub fn clear_analysis_data(&mut self) {
        self.set_analysis_data(None);
    }

    pub fn read(&self) -> Arc<AnalysisResult> {
        Arc::clone(&self.snapshot)
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Registers `callback` for changes to any of `interests`; an empty list
    /// subscribes to every field.
    pub fn subscribe(
        &mut self,
        interests: &[SubReport],
        callback: impl FnMut(&StoreChange<'_>) + 'static,
    ) -> SubscriptionId {
        let id = SubscriptionId(self.next_subscription);
        self.next_subscription += 1;
        self.subscriptions.push(Subscription {
            id,
            interests: interests.to_vec(),
            callback: Box::new(callback),
        });
        id
    }

    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.subscriptions.len();
        self.subscriptions.retain(|s| s.id != id);
        self.subscriptions.len() != before
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::{Bucket, ColumnDistribution, KpiData, TimeSeries};
    use std::cell::RefCell;
    use std::rc::Rc;

    fn kpi() -> KpiData {
        KpiData {
            total_records: 3.0,
            total_records_delta: 0.0,
            data_quality: 100.0,
            data_quality_delta: 0.0,
            columns: 2.0,
            columns_delta: 0.0,
            anomalies: 0.0,
            anomalies_delta: 0.0,
            anomalies_delta_type: None,
        }
    }

    fn payload() -> AnalysisPayload {
        AnalysisPayload {
            kpi_data: Some(kpi()),
            column_dist: Some(ColumnDistribution {
                column_name: "region".into(),
                chart_data: vec![Bucket { name: "EU".into(), value: 2.0 }],
            }),
            ..Default::default()
        }
    }

    #[test]
    fn test_read_returns_null_defaulted_merge() {
        let mut store = AnalysisStore::new();
        store.set_analysis_data(Some(payload()));

        let snapshot = store.read();
        assert_eq!(*snapshot, AnalysisResult::from(payload()));
        assert!(snapshot.kpi.is_present());
        assert!(snapshot.column_distribution.is_present());
        assert!(!snapshot.insights.is_present());
        assert!(!snapshot.time_series.is_present());
        assert!(!snapshot.correlation_matrix.is_present());
    }

    #[test]
    fn test_set_replaces_wholesale() {
        let mut store = AnalysisStore::new();
        store.set_analysis_data(Some(payload()));
        store.set_analysis_data(Some(AnalysisPayload {
            time_series: Some(TimeSeries::without_time_column()),
            ..Default::default()
        }));

        let snapshot = store.read();
        assert!(!snapshot.kpi.is_present());
        assert!(!snapshot.column_distribution.is_present());
        assert!(snapshot.time_series.is_present());
    }

    #[test]
    fn test_clear_resets_every_field() {
        let mut store = AnalysisStore::new();
        store.set_analysis_data(Some(payload()));
        store.clear_analysis_data();

        let snapshot = store.read();
        for report in SubReport::ALL {
            assert!(!snapshot.is_present(report));
        }
        assert_eq!(*snapshot, AnalysisResult::default());
    }

    #[test]
    fn test_repeated_set_is_idempotent() {
        let mut store = AnalysisStore::new();
        let calls = Rc::new(RefCell::new(0));
        let counter = Rc::clone(&calls);
        store.subscribe(&[], move |_| *counter.borrow_mut() += 1);

        store.set_analysis_data(Some(payload()));
        let first = store.read();
        let generation = store.generation();
        store.set_analysis_data(Some(payload()));

        assert_eq!(*store.read(), *first);
        assert_eq!(store.generation(), generation);
        assert_eq!(*calls.borrow(), 1);
    }

    #[test]
    fn test_old_snapshot_is_unaffected_by_later_writes() {
        let mut store = AnalysisStore::new();
        store.set_analysis_data(Some(payload()));
        let held = store.read();
        store.clear_analysis_data();

        assert!(held.kpi.is_present());
        assert!(!store.read().kpi.is_present());
    }

    #[test]
    fn test_subscribers_see_complete_snapshot_synchronously() {
        let mut store = AnalysisStore::new();
        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&seen);
        store.subscribe(&[SubReport::Kpi], move |change| {
            sink.borrow_mut().push((
                change.generation,
                change.snapshot.kpi.is_present(),
                change.snapshot.column_distribution.is_present(),
            ));
        });

        store.set_analysis_data(Some(payload()));
        assert_eq!(*seen.borrow(), vec![(1, true, true)]);
    }

    #[test]
    fn test_subscribers_only_hear_their_fields() {
        let mut store = AnalysisStore::new();
        let calls = Rc::new(RefCell::new(0));
        let counter = Rc::clone(&calls);
        store.subscribe(&[SubReport::CorrelationMatrix], move |_| *counter.borrow_mut() += 1);

        store.set_analysis_data(Some(payload()));
        assert_eq!(*calls.borrow(), 0);
    }

    #[test]
    fn test_unsubscribe_stops_notifications() {
        let mut store = AnalysisStore::new();
        let calls = Rc::new(RefCell::new(0));
        let counter = Rc::clone(&calls);
        let id = store.subscribe(&[], move |_| *counter.borrow_mut() += 1);

        assert!(store.unsubscribe(id));
        assert!(!store.unsubscribe(id));
        store.set_analysis_data(Some(payload()));
        assert_eq!(*calls.borrow(), 0);
    }
}
