use crate::error::{GofError, Result};
use crate::sample_store::SampleStore;
use crate::stats::{mean, population_covariance, population_std, range, sum_squared_deviations};

// Goodness-of-fit measures between observed (y) and predicted (x) values.
// All of them read the store and fail before computing anything if the two
// series differ in length or hold no pairs. The error of pair i is y_i - x_i.

// Mean of squared errors
pub fn mse(store: &SampleStore) -> Result<f64> {
    let (y, x) = store.aligned()?;
    Ok((&y - &x).norm_squared() / y.len() as f64)
}

pub fn rmse(store: &SampleStore) -> Result<f64> {
    Ok(mse(store)?.sqrt())
}

// Root mean square deviation, same value as `rmse`
pub fn rmsd(store: &SampleStore) -> Result<f64> {
    let mse = mse(store)?;
    Ok(mse.sqrt())
}

// Signed mean error; positive when the model under-predicts
pub fn mean_bias(store: &SampleStore) -> Result<f64> {
    let (y, x) = store.aligned()?;
    Ok((&y - &x).sum() / y.len() as f64)
}

// Coefficient of determination, 1 - SSres / SStot
pub fn r_squared(store: &SampleStore) -> Result<f64> {
    let (y, x) = store.aligned()?;
    let ss_res = (&y - &x).norm_squared();
    let ss_tot = sum_squared_deviations(&y);
    if ss_tot == 0.0 {
        return Err(GofError::DivideByZero {
            metric: "r2",
            quantity: "total sum of squares",
        });
    }
    Ok(1.0 - ss_res / ss_tot)
}

/**
Kendall's rank correlation between predicted and observed values.

Every unordered index pair (i, j) is compared once. The pair is concordant
when (x_i - x_j)(y_i - y_j) > 0 and discordant when it is < 0. Ties count
as neither, yet still belong to the n(n-1)/2 pairs in the denominator, so
no tie correction is applied.

# Errors
`SingleSample` when only one pair is stored.
*/
pub fn kendall_tau(store: &SampleStore) -> Result<f64> {
    let (y, x) = store.aligned()?;
    let n = y.len();
    if n < 2 {
        return Err(GofError::SingleSample {
            metric: "kendalltau",
        });
    }

    let mut concordant = 0_i64;
    let mut discordant = 0_i64;
    for i in 0..n {
        for j in (i + 1)..n {
            let product = (x[i] - x[j]) * (y[i] - y[j]);
            if product > 0.0 {
                concordant += 1;
            } else if product < 0.0 {
                discordant += 1;
            }
        }
    }

    let total_pairs = (n * (n - 1) / 2) as f64;
    Ok((concordant - discordant) as f64 / total_pairs)
}

// Willmott's index of agreement,
// 1 - Σ(y_i - x_i)² / Σ(|y_i - ȳ| + |x_i - ȳ|)²
pub fn index_of_agreement(store: &SampleStore) -> Result<f64> {
    let (y, x) = store.aligned()?;
    let y_mean = mean(&y);
    let numerator = (&y - &x).norm_squared();
    let denominator = y
        .zip_map(&x, |yi, xi| ((yi - y_mean).abs() + (xi - y_mean).abs()).powi(2))
        .sum();
    if denominator == 0.0 {
        return Err(GofError::DivideByZero {
            metric: "idx",
            quantity: "potential error",
        });
    }
    Ok(1.0 - numerator / denominator)
}

/**
Kling-Gupta efficiency.

KGE = 1 - sqrt((μx/μy - 1)² + (σx/σy - 1)² + (r - 1)²)

Means and standard deviations are population moments (divisor n) and r is
the population covariance divided by σx·σy.

# Errors
`DivideByZero` if the observed mean, the observed standard deviation or the
predicted standard deviation is zero.
*/
pub fn kling_gupta(store: &SampleStore) -> Result<f64> {
    let (y, x) = store.aligned()?;
    let mu_y = mean(&y);
    let mu_x = mean(&x);
    let sigma_y = population_std(&y);
    let sigma_x = population_std(&x);

    let zero = |quantity| GofError::DivideByZero {
        metric: "kling",
        quantity,
    };
    if mu_y == 0.0 {
        return Err(zero("observed mean"));
    }
    if sigma_y == 0.0 {
        return Err(zero("observed standard deviation"));
    }
    if sigma_x == 0.0 {
        return Err(zero("predicted standard deviation"));
    }

    let r = population_covariance(&x, &y) / (sigma_x * sigma_y);
    let bias_ratio = mu_x / mu_y - 1.0;
    let variability_ratio = sigma_x / sigma_y - 1.0;
    let correlation = r - 1.0;
    Ok(1.0 - (bias_ratio.powi(2) + variability_ratio.powi(2) + correlation.powi(2)).sqrt())
}

// Derivation of gain: one minus the RMSE of errors scaled by the observed range
pub fn derivation_of_gain(store: &SampleStore) -> Result<f64> {
    let (y, x) = store.aligned()?;
    let range_y = range(&y);
    if range_y == 0.0 {
        return Err(GofError::DivideByZero {
            metric: "deri",
            quantity: "observed range",
        });
    }
    let scaled = (&y - &x) / range_y;
    Ok(1.0 - (scaled.norm_squared() / y.len() as f64).sqrt())
}

// RMSE normalised by the observed range. Not offered through the catalog.
pub fn nrmse(store: &SampleStore) -> Result<f64> {
    let rmse = rmse(store)?;
    let (y, _) = store.aligned()?;
    let range_y = range(&y);
    if range_y == 0.0 {
        return Err(GofError::DivideByZero {
            metric: "nrmse",
            quantity: "observed range",
        });
    }
    Ok(rmse / range_y)
}

// Mean bias as a percentage of the observed mean. Not offered through the catalog.
pub fn relative_bias_percent(store: &SampleStore) -> Result<f64> {
    let mbe = mean_bias(store)?;
    let (y, _) = store.aligned()?;
    let mu_y = mean(&y);
    if mu_y == 0.0 {
        return Err(GofError::DivideByZero {
            metric: "relative_bias_percent",
            quantity: "observed mean",
        });
    }
    Ok(mbe / mu_y * 100.0)
}
