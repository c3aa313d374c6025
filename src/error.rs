use thiserror::Error;

pub type Result<T> = std::result::Result<T, GofError>;

// Failures of ingestion and metric computation. None of them leave the
// sample store in a changed state.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum GofError {
    #[error("{field} value '{input}' is not a number")]
    Parse { field: &'static str, input: String },

    #[error("number of observed ({observed}) and predicted ({predicted}) values must be equal")]
    LengthMismatch { observed: usize, predicted: usize },

    #[error("no sample pairs to evaluate")]
    EmptySample,

    #[error("{metric} needs at least two sample pairs")]
    SingleSample { metric: &'static str },

    #[error("{metric} is undefined: {quantity} is zero")]
    DivideByZero {
        metric: &'static str,
        quantity: &'static str,
    },

    #[error("unknown metric '{0}'")]
    UnknownMetric(String),
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("failed to read config: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse config: {0}")]
    Toml(#[from] toml::de::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_name_the_offending_input() {
        let err = GofError::Parse {
            field: "observed",
            input: "abc".to_string(),
        };
        assert_eq!(err.to_string(), "observed value 'abc' is not a number");

        let err = GofError::LengthMismatch {
            observed: 3,
            predicted: 2,
        };
        assert!(err.to_string().contains("(3)"));
        assert!(err.to_string().contains("(2)"));

        let err = GofError::DivideByZero {
            metric: "r2",
            quantity: "total sum of squares",
        };
        assert_eq!(err.to_string(), "r2 is undefined: total sum of squares is zero");
    }
}
