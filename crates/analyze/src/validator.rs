//! Completeness validator session.
//!
//! Owns the most recent report and notifies subscribers whenever a run
//! replaces it. Each session is independent; there is no global store.

use crate::report::ValidationReport;
use crate::validate;
use screenflow_interchange::ScreenSpec;

/// Handle returned by [`CompletenessValidator::subscribe`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

type ReportCallback = Box<dyn FnMut(&ValidationReport) + Send>;

/// A validation session over successive specifications.
#[derive(Default)]
pub struct CompletenessValidator {
    last_report: Option<ValidationReport>,
    subscribers: Vec<(SubscriptionId, ReportCallback)>,
    next_subscription: u64,
}

impl CompletenessValidator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Validate `spec`, replacing the previous report.
    pub fn run(&mut self, spec: &ScreenSpec) -> &ValidationReport {
        let report = validate(&spec.interfaces, &spec.flows);
        for (_, callback) in self.subscribers.iter_mut() {
            callback(&report);
        }
        self.last_report.insert(report)
    }

    pub fn last_report(&self) -> Option<&ValidationReport> {
        self.last_report.as_ref()
    }

    /// Register a callback invoked with every new report.
    pub fn subscribe<F>(&mut self, callback: F) -> SubscriptionId
    where
        F: FnMut(&ValidationReport) + Send + 'static,
    {
        let id = SubscriptionId(self.next_subscription);
        self.next_subscription += 1;
        self.subscribers.push((id, Box::new(callback)));
        id
    }

    /// Remove a callback. Returns false if it was not registered.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.subscribers.len();
        self.subscribers.retain(|(sid, _)| *sid != id);
        self.subscribers.len() != before
    }
}

impl std::fmt::Debug for CompletenessValidator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CompletenessValidator")
            .field("last_report", &self.last_report)
            .field("subscribers", &self.subscribers.len())
            .finish()
    }
}
