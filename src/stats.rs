use nalgebra::DVector;

// Population moments over a single series. Every caller has already rejected
// empty input, so the divisions by `len` below are always defined.

pub(crate) fn mean(v: &DVector<f64>) -> f64 {
    v.sum() / v.len() as f64
}

// max - min
pub(crate) fn range(v: &DVector<f64>) -> f64 {
    v.max() - v.min()
}

// Σ(v_i - mean)². A constant series yields exactly 0.0, independent of
// rounding in the mean.
pub(crate) fn sum_squared_deviations(v: &DVector<f64>) -> f64 {
    if range(v) == 0.0 {
        return 0.0;
    }
    v.add_scalar(-mean(v)).norm_squared()
}

// Standard deviation with divisor n
pub(crate) fn population_std(v: &DVector<f64>) -> f64 {
    (sum_squared_deviations(v) / v.len() as f64).sqrt()
}

// Covariance with divisor n. `x` and `y` have the same length.
pub(crate) fn population_covariance(x: &DVector<f64>, y: &DVector<f64>) -> f64 {
    let dx = x.add_scalar(-mean(x));
    let dy = y.add_scalar(-mean(y));
    dx.dot(&dy) / x.len() as f64
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn moments_of_a_known_series() {
        let v = DVector::from_vec(vec![2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0]);
        assert_relative_eq!(mean(&v), 5.0);
        assert_relative_eq!(population_std(&v), 2.0);
        assert_relative_eq!(range(&v), 7.0);
    }

    #[test]
    fn constant_series_has_zero_spread() {
        let v = DVector::from_element(5, 0.1);
        assert_eq!(sum_squared_deviations(&v), 0.0);
        assert_eq!(population_std(&v), 0.0);
        assert_eq!(range(&v), 0.0);
    }

    #[test]
    fn covariance_of_series_with_itself_is_variance() {
        let v = DVector::from_vec(vec![1.0, 3.0, 8.0]);
        let sd = population_std(&v);
        assert_relative_eq!(population_covariance(&v, &v), sd * sd, epsilon = 1e-12);

        let w = DVector::from_vec(vec![3.0, 1.0, -4.0]);
        assert!(population_covariance(&v, &w) < 0.0);
    }
}
