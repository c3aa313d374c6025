use crate::error::{GofError, Result};
use crate::metrics;
use crate::sample_store::SampleStore;
use log::debug;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

// Metrics that can be selected by name
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MetricId {
    Mse,
    Rmse,
    Rmsd,
    MeanBias,
    R2,
    KendallTau,
    Idx,
    Kling,
    Deri,
}

impl MetricId {
    // Selector order
    pub const ALL: [MetricId; 9] = [
        MetricId::Mse,
        MetricId::Rmse,
        MetricId::Rmsd,
        MetricId::MeanBias,
        MetricId::R2,
        MetricId::KendallTau,
        MetricId::Idx,
        MetricId::Kling,
        MetricId::Deri,
    ];

    pub fn id(self) -> &'static str {
        match self {
            MetricId::Mse => "mse",
            MetricId::Rmse => "rmse",
            MetricId::Rmsd => "rmsd",
            MetricId::MeanBias => "meanbias",
            MetricId::R2 => "r2",
            MetricId::KendallTau => "kendalltau",
            MetricId::Idx => "idx",
            MetricId::Kling => "kling",
            MetricId::Deri => "deri",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            MetricId::Mse => "MSE",
            MetricId::Rmse => "RMSE",
            MetricId::Rmsd => "RMSD",
            MetricId::MeanBias => "Mean Bias Error",
            MetricId::R2 => "R Squared",
            MetricId::KendallTau => "Kendall's Tau",
            MetricId::Idx => "Index of Agreement",
            MetricId::Kling => "Kling Gupta Efficiency (KGE)",
            MetricId::Deri => "Derivation of Gain",
        }
    }

    fn function(self) -> fn(&SampleStore) -> Result<f64> {
        match self {
            MetricId::Mse => metrics::mse,
            MetricId::Rmse => metrics::rmse,
            MetricId::Rmsd => metrics::rmsd,
            MetricId::MeanBias => metrics::mean_bias,
            MetricId::R2 => metrics::r_squared,
            MetricId::KendallTau => metrics::kendall_tau,
            MetricId::Idx => metrics::index_of_agreement,
            MetricId::Kling => metrics::kling_gupta,
            MetricId::Deri => metrics::derivation_of_gain,
        }
    }
}

impl fmt::Display for MetricId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

impl FromStr for MetricId {
    type Err = GofError;

    fn from_str(s: &str) -> Result<Self> {
        MetricId::ALL
            .into_iter()
            .find(|metric| metric.id() == s)
            .ok_or_else(|| GofError::UnknownMetric(s.to_string()))
    }
}

/**
Computes one catalog metric over the current contents of `store`.

The store is only read; a failed computation leaves it as it was.
*/
pub fn compute(metric: MetricId, store: &SampleStore) -> Result<f64> {
    let result = (metric.function())(store);
    match &result {
        Ok(value) => debug!("{} over {} pairs = {}", metric, store.len(), value),
        Err(e) => debug!("{} failed: {}", metric, e),
    }
    result
}

// Same as `compute`, selecting the metric by its id string
pub fn compute_named(name: &str, store: &SampleStore) -> Result<f64> {
    compute(name.parse()?, store)
}

// Results of several metrics over one store snapshot
#[derive(Debug, Clone, PartialEq)]
pub struct EvaluationReport {
    pub pairs: usize,
    pub results: Vec<(MetricId, Result<f64>)>,
}

impl EvaluationReport {
    pub fn get(&self, metric: MetricId) -> Option<&Result<f64>> {
        self.results
            .iter()
            .find(|(id, _)| *id == metric)
            .map(|(_, result)| result)
    }

    // Renders one line per metric, values with `precision` decimals
    pub fn render(&self, precision: usize) -> String {
        let width = self
            .results
            .iter()
            .map(|(id, _)| id.label().len())
            .max()
            .unwrap_or(0);
        let mut out = format!("{} sample pairs\n", self.pairs);
        for (id, result) in &self.results {
            let line = match result {
                Ok(value) => format!("{:<width$}  {:.precision$}\n", id.label(), value),
                Err(e) => format!("{:<width$}  error: {}\n", id.label(), e),
            };
            out.push_str(&line);
        }
        out
    }
}

pub fn evaluate(store: &SampleStore, metrics: &[MetricId]) -> EvaluationReport {
    EvaluationReport {
        pairs: store.len(),
        results: metrics
            .iter()
            .map(|&metric| (metric, compute(metric, store)))
            .collect(),
    }
}
