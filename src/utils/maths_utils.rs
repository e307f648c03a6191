use argminmax::ArgMinMax;
use statrs::statistics::Statistics;

/// Arithmetic mean, with an explicit 0.0 for the empty slice so callers never
/// see the NaN statrs would produce.
pub fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    values.iter().mean()
}

/// Sample standard deviation (n - 1 denominator). 0.0 for fewer than two values.
pub fn sample_std_dev(values: &[f64]) -> f64 {
    if values.len() < 2 {
        return 0.0;
    }
    values.iter().std_dev()
}

/// Population standard deviation (n denominator). 0.0 for the empty slice.
pub fn population_std_dev(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    values.iter().population_std_dev()
}

pub fn get_max(vec: &[f64]) -> f64 {
    let max_index: usize = vec.argmax();
    vec[max_index]
}

pub fn get_min(vec: &[f64]) -> f64 {
    let min_index: usize = vec.argmin();
    vec[min_index]
}

/// Clamp into the signed unit interval [-1, 1] used by all component scores.
#[inline]
pub fn clamp_signed_unit(value: f64) -> f64 {
    value.clamp(-1.0, 1.0)
}

/// Clamp into [0, 1].
#[inline]
pub fn clamp_unit(value: f64) -> f64 {
    value.clamp(0.0, 1.0)
}

/// Exponential moving average over `values`, one entry per input.
///
/// Seeded with the simple mean of the first `period` values (so the first
/// defined entry sits at index `period - 1`), then the usual recursive form
/// with multiplier 2 / (period + 1). Entries before the seed are `None`.
pub fn ema_series(values: &[f64], period: usize) -> Vec<Option<f64>> {
    if period == 0 || values.len() < period {
        return vec![None; values.len()];
    }

    let mut out = vec![None; values.len()];
    let multiplier = 2.0 / (period as f64 + 1.0);

    let mut ema = mean(&values[..period]);
    out[period - 1] = Some(ema);

    for (i, &value) in values.iter().enumerate().skip(period) {
        ema = (value - ema) * multiplier + ema;
        out[i] = Some(ema);
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ema_seed_is_simple_mean() {
        let values = [1.0, 2.0, 3.0, 4.0, 5.0];
        let ema = ema_series(&values, 3);

        assert_eq!(ema[0], None);
        assert_eq!(ema[1], None);
        assert!((ema[2].unwrap() - 2.0).abs() < 1e-12, "seed should be SMA(3)");
        // (4 - 2) * 0.5 + 2 = 3
        assert!((ema[3].unwrap() - 3.0).abs() < 1e-12);
    }

    #[test]
    fn test_ema_short_input_is_all_none() {
        let values = [1.0, 2.0];
        assert!(ema_series(&values, 3).iter().all(|v| v.is_none()));
    }

    #[test]
    fn test_stddev_degenerate_inputs() {
        assert_eq!(sample_std_dev(&[42.0]), 0.0);
        assert_eq!(population_std_dev(&[]), 0.0);
        assert_eq!(mean(&[]), 0.0);
    }

    #[test]
    fn test_window_extrema() {
        let values = [3.0, 9.0, 1.0, 4.0];
        assert_eq!(get_max(&values), 9.0);
        assert_eq!(get_min(&values), 1.0);
    }

    #[test]
    fn test_clamps() {
        assert_eq!(clamp_signed_unit(1.7), 1.0);
        assert_eq!(clamp_signed_unit(-3.0), -1.0);
        assert_eq!(clamp_unit(-0.2), 0.0);
    }
}
