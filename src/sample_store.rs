use crate::error::{GofError, Result};
use csv::{ReaderBuilder, Terminator, Trim};
use log::{debug, warn};
use nalgebra::DVector;
use serde::Serialize;

// One measurement and the model's estimate for it
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SamplePair {
    pub observed: f64,  // Ground truth ("y")
    pub predicted: f64, // Simulated value ("x")
}

// Outcome of a CSV bulk load
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CsvSummary {
    pub accepted: usize, // Rows turned into sample pairs
    pub skipped: usize,  // Non-blank rows dropped for field count or unparseable values
}

// A named series handed to whatever draws the observed/predicted chart
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LabeledSeries<'a> {
    pub label: &'static str,
    pub values: &'a [f64],
}

// Two aligned series of observed and predicted values. Index `i` of each
// series belongs to the same pair.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SampleStore {
    observed: Vec<f64>,
    predicted: Vec<f64>,
}

impl SampleStore {
    pub fn new() -> Self {
        SampleStore::default()
    }

    // Takes both series as they are. Unequal lengths are not corrected here;
    // every metric reports them as `LengthMismatch`.
    pub fn from_series(observed: Vec<f64>, predicted: Vec<f64>) -> Self {
        SampleStore {
            observed,
            predicted,
        }
    }

    pub fn push(&mut self, pair: SamplePair) {
        self.observed.push(pair.observed);
        self.predicted.push(pair.predicted);
    }

    /// Appends one pair entered as text.
    ///
    /// Both inputs must be non-empty finite numbers; surrounding whitespace is
    /// ignored. On error the store is left untouched.
    pub fn append(&mut self, observed: &str, predicted: &str) -> Result<SamplePair> {
        let pair = SamplePair {
            observed: parse_value("observed", observed)?,
            predicted: parse_value("predicted", predicted)?,
        };
        self.push(pair);
        debug!("appended pair {:?}, {} pairs stored", pair, self.len());
        Ok(pair)
    }

    /**
    Replaces the contents of the store with the pairs found in `text`.

    Each `\n` terminated line is a comma separated row; quotes carry no
    meaning, so a stray `"` only spoils its own row. A row becomes a pair only if it has
    exactly two fields and both parse as finite numbers; column 0 is the
    predicted value and column 1 the observed one. Any other row is dropped
    and counted in the returned summary. Blank lines are ignored.

    # Arguments
    * `text` - Whole CSV document held in memory.
    * `trim_whitespace` - Trim each field before parsing it.
    */
    pub fn load_csv(&mut self, text: &str, trim_whitespace: bool) -> CsvSummary {
        let mut reader = ReaderBuilder::new()
            .has_headers(false)
            .flexible(true)
            .quoting(false)
            .terminator(Terminator::Any(b'\n'))
            .trim(if trim_whitespace { Trim::All } else { Trim::None })
            .from_reader(text.as_bytes());

        let mut observed = Vec::new();
        let mut predicted = Vec::new();
        let mut summary = CsvSummary::default();

        for (index, record) in reader.records().enumerate() {
            let record = match record {
                Ok(record) => record,
                Err(e) => {
                    debug!("csv record {}: {}", index + 1, e);
                    summary.skipped += 1;
                    continue;
                }
            };
            if record.len() != 2 {
                debug!("csv record {}: {} fields, expected 2", index + 1, record.len());
                summary.skipped += 1;
                continue;
            }
            match (parse_field(&record[0]), parse_field(&record[1])) {
                (Some(x), Some(y)) => {
                    predicted.push(x);
                    observed.push(y);
                    summary.accepted += 1;
                }
                _ => {
                    debug!("csv record {}: non-numeric field in {:?}", index + 1, record);
                    summary.skipped += 1;
                }
            }
        }

        if summary.skipped > 0 {
            warn!(
                "csv load skipped {} malformed rows, kept {}",
                summary.skipped, summary.accepted
            );
        } else {
            debug!("csv load kept {} pairs", summary.accepted);
        }
        self.observed = observed;
        self.predicted = predicted;
        summary
    }

    pub fn reset(&mut self) {
        self.observed.clear();
        self.predicted.clear();
    }

    // Number of complete pairs
    pub fn len(&self) -> usize {
        self.observed.len().min(self.predicted.len())
    }

    // No complete pair, even if one series holds stray values
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn observed(&self) -> &[f64] {
        &self.observed
    }

    pub fn predicted(&self) -> &[f64] {
        &self.predicted
    }

    pub fn pairs(&self) -> impl Iterator<Item = SamplePair> + '_ {
        self.observed
            .iter()
            .zip(&self.predicted)
            .map(|(&observed, &predicted)| SamplePair {
                observed,
                predicted,
            })
    }

    pub fn series(&self) -> [LabeledSeries<'_>; 2] {
        [
            LabeledSeries {
                label: "Observed",
                values: &self.observed,
            },
            LabeledSeries {
                label: "Predicted",
                values: &self.predicted,
            },
        ]
    }

    // Observed and predicted as vectors, after the checks every metric shares:
    // equal lengths first, then at least one pair.
    pub(crate) fn aligned(&self) -> Result<(DVector<f64>, DVector<f64>)> {
        if self.observed.len() != self.predicted.len() {
            return Err(GofError::LengthMismatch {
                observed: self.observed.len(),
                predicted: self.predicted.len(),
            });
        }
        if self.observed.is_empty() {
            return Err(GofError::EmptySample);
        }
        Ok((
            DVector::from_column_slice(&self.observed),
            DVector::from_column_slice(&self.predicted),
        ))
    }
}

impl FromIterator<SamplePair> for SampleStore {
    fn from_iter<I: IntoIterator<Item = SamplePair>>(iter: I) -> Self {
        let mut store = SampleStore::new();
        for pair in iter {
            store.push(pair);
        }
        store
    }
}

pub(crate) fn parse_value(field: &'static str, input: &str) -> Result<f64> {
    parse_field(input.trim()).ok_or_else(|| GofError::Parse {
        field,
        input: input.to_string(),
    })
}

// `f64::from_str` accepts "NaN" and "inf"; neither is a usable sample.
fn parse_field(s: &str) -> Option<f64> {
    s.parse::<f64>().ok().filter(|v| v.is_finite())
}
