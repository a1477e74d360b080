//! Sample statistics for timed trials

use crate::benchmark::result::Measurement;
use statrs::distribution::{ContinuousCDF, StudentsT};
use statrs::statistics::Statistics;
use statrs::StatsError;

/// Upper quantile for a two-sided 95% interval
const CONFIDENCE_QUANTILE: f64 = 0.975;

/// Two-sided 95% Student-t critical value; `df` must be positive
pub fn critical_t(df: usize) -> Result<f64, StatsError> {
    let dist = StudentsT::new(0.0, 1.0, df as f64)?;
    Ok(dist.inverse_cdf(CONFIDENCE_QUANTILE))
}

/// Summarize per-operation times (seconds)
///
/// Fewer than two samples leave the margin of error at zero.
pub fn summarize(per_op_secs: &[f64]) -> Measurement {
    let size = per_op_secs.len();
    let mean = per_op_secs.iter().mean();
    if !(mean > 0.0 && mean.is_finite()) {
        return Measurement {
            hz: 0.0,
            rme: 0.0,
            size,
        };
    }

    let rme = match critical_t(size.saturating_sub(1)) {
        Ok(t) => {
            let sem = (per_op_secs.iter().variance() / size as f64).sqrt();
            let rme = sem * t / mean * 100.0;
            if rme.is_finite() {
                rme
            } else {
                0.0
            }
        }
        Err(_) => 0.0,
    };

    Measurement {
        hz: 1.0 / mean,
        rme,
        size,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_critical_t_values() {
        assert!((critical_t(1).unwrap() - 12.706).abs() < 1e-3);
        assert!((critical_t(3).unwrap() - 3.182).abs() < 1e-3);
        assert!((critical_t(30).unwrap() - 2.042).abs() < 1e-3);
        assert!((critical_t(100_000).unwrap() - 1.96).abs() < 1e-3);
        assert!(critical_t(0).is_err());
    }

    #[test]
    fn test_constant_samples_have_zero_rme() {
        let m = summarize(&[0.001; 10]);
        assert!((m.hz - 1000.0).abs() < 1e-6);
        assert!(m.rme < 1e-9);
        assert_eq!(m.size, 10);
    }

    #[test]
    fn test_rme_matches_hand_computation() {
        // mean 2, sample variance 2/3, sem sqrt(2/3 / 4)
        let samples = [1.0, 2.0, 2.0, 3.0];
        let m = summarize(&samples);
        let expected = (2.0f64 / 3.0 / 4.0).sqrt() * critical_t(3).unwrap() / 2.0 * 100.0;
        assert!((m.rme - expected).abs() < 1e-9);
        assert!((m.hz - 0.5).abs() < 1e-12);
    }

    #[test]
    fn test_degenerate_samples() {
        let m = summarize(&[]);
        assert_eq!((m.hz, m.rme, m.size), (0.0, 0.0, 0));
        let m = summarize(&[0.0, 0.0]);
        assert_eq!(m.hz, 0.0);
        let m = summarize(&[0.002]);
        assert_eq!((m.hz, m.rme, m.size), (500.0, 0.0, 1));
    }
}
