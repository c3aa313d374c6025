use crate::catalog::{self, EvaluationReport, MetricId};
use crate::config::EngineConfig;
use crate::error::Result;
use crate::sample_store::{CsvSummary, LabeledSeries, SamplePair, SampleStore};
use log::info;

// Text typed into the two manual entry fields but not yet added
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PendingEntry {
    pub observed: String,
    pub predicted: String,
}

// One calculator session: the samples, the manual entry buffers and the
// settings they are evaluated with. Sessions share nothing with each other.
#[derive(Debug, Clone, Default)]
pub struct Session {
    store: SampleStore,
    pending: PendingEntry,
    config: EngineConfig,
}

impl Session {
    pub fn new() -> Self {
        Session::default()
    }

    pub fn with_config(config: EngineConfig) -> Self {
        Session {
            config,
            ..Session::default()
        }
    }

    pub fn store(&self) -> &SampleStore {
        &self.store
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn pending(&self) -> &PendingEntry {
        &self.pending
    }

    pub fn set_observed_input(&mut self, text: &str) {
        self.pending.observed = text.to_string();
    }

    pub fn set_predicted_input(&mut self, text: &str) {
        self.pending.predicted = text.to_string();
    }

    // Adds the pending pair. The buffers are cleared on success and kept on
    // failure so the entry can be corrected.
    pub fn add_entry(&mut self) -> Result<SamplePair> {
        let pair = self
            .store
            .append(&self.pending.observed, &self.pending.predicted)?;
        self.pending = PendingEntry::default();
        Ok(pair)
    }

    pub fn append(&mut self, observed: &str, predicted: &str) -> Result<SamplePair> {
        self.store.append(observed, predicted)
    }

    pub fn load_csv(&mut self, text: &str) -> CsvSummary {
        self.store.load_csv(text, self.config.csv.trim_whitespace)
    }

    pub fn reset(&mut self) {
        self.store.reset();
        self.pending = PendingEntry::default();
        info!("session reset");
    }

    pub fn compute(&self, metric: MetricId) -> Result<f64> {
        catalog::compute(metric, &self.store)
    }

    pub fn compute_named(&self, name: &str) -> Result<f64> {
        catalog::compute_named(name, &self.store)
    }

    // Evaluates the metrics listed in the report settings
    pub fn evaluate(&self) -> EvaluationReport {
        catalog::evaluate(&self.store, &self.config.report.metrics)
    }

    pub fn render_report(&self) -> String {
        self.evaluate().render(self.config.report.precision)
    }

    pub fn series(&self) -> [LabeledSeries<'_>; 2] {
        self.store.series()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ReportConfig;
    use crate::error::GofError;

    #[test]
    fn manual_entry_moves_buffers_into_the_store() {
        let mut session = Session::new();
        session.set_observed_input("3.2");
        session.set_predicted_input("2.9");
        let pair = session.add_entry().unwrap();
        assert_eq!(
            pair,
            SamplePair {
                observed: 3.2,
                predicted: 2.9
            }
        );
        assert_eq!(session.pending(), &PendingEntry::default());
        assert_eq!(session.store().len(), 1);
    }

    #[test]
    fn failed_entry_keeps_buffers_and_samples() {
        let mut session = Session::new();
        session.append("1", "1").unwrap();
        session.set_observed_input("4");
        session.set_predicted_input("four");
        assert!(matches!(
            session.add_entry(),
            Err(GofError::Parse { field: "predicted", .. })
        ));
        assert_eq!(session.pending().observed, "4");
        assert_eq!(session.pending().predicted, "four");
        assert_eq!(session.store().len(), 1);

        session.set_observed_input("");
        session.set_predicted_input("2");
        assert!(session.add_entry().is_err());
        assert_eq!(session.store().len(), 1);
    }

    #[test]
    fn reset_clears_samples_and_buffers() {
        let mut session = Session::new();
        session.load_csv("1,2\n3,4\n");
        session.set_observed_input("9");
        session.reset();
        assert!(session.store().is_empty());
        assert_eq!(session.pending(), &PendingEntry::default());
        assert_eq!(session.compute(MetricId::Mse).unwrap_err(), GofError::EmptySample);
    }

    #[test]
    fn csv_load_follows_session_settings() {
        let mut strict = EngineConfig::default();
        strict.csv.trim_whitespace = false;
        let mut session = Session::with_config(strict);
        let summary = session.load_csv("1, 2\n3,4\n");
        assert_eq!(summary, CsvSummary { accepted: 1, skipped: 1 });
    }

    #[test]
    fn session_survives_failed_computations() {
        let mut session = Session::new();
        session.append("5", "5").unwrap();
        assert!(session.compute(MetricId::KendallTau).is_err());
        assert!(session.compute_named("bogus").is_err());
        session.append("6", "7").unwrap();
        assert_eq!(session.compute(MetricId::KendallTau).unwrap(), 1.0);
    }

    #[test]
    fn report_uses_configured_metrics() {
        let config = EngineConfig {
            report: ReportConfig {
                metrics: vec![MetricId::Rmse, MetricId::Deri],
                precision: 3,
            },
            ..EngineConfig::default()
        };
        let mut session = Session::with_config(config);
        session.load_csv("1,1\n2,2\n3,3\n5,4\n");

        let report = session.evaluate();
        assert_eq!(report.results.len(), 2);
        let text = session.render_report();
        assert!(text.contains("0.500"));
        assert!(text.contains("Derivation of Gain"));
        assert!(!text.contains("Kendall"));
    }
}
