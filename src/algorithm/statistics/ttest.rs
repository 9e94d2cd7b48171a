//! Independent two-sample t-tests
//!
//! Missing values are expected to have been removed by the caller. When a
//! group has fewer than two observations, or both groups have no spread, the
//! statistic and p-value are NaN and a warning is logged; the run carries on.

use serde::{Deserialize, Serialize};
use statrs::distribution::{ContinuousCDF, StudentsT};

use crate::algorithm::statistics::descriptive::{mean, sample_variance};
use crate::config::TTestVariant;
use crate::error::{PipelineError, Result};

/// Outcome of a two-sample t-test
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TTestResult {
    pub variant: TTestVariant,
    pub statistic: f64,
    /// Two-sided p-value
    pub p_value: f64,
    pub degrees_of_freedom: f64,
    pub n_a: usize,
    pub n_b: usize,
    pub mean_a: f64,
    pub mean_b: f64,
}

impl TTestResult {
    /// Whether the test produced a usable p-value
    #[must_use]
    pub fn is_defined(&self) -> bool {
        self.p_value.is_finite()
    }
}

/// Compare the means of two independent samples
///
/// The statistic is positive when `a` has the larger mean.
pub fn two_sample_ttest(a: &[f64], b: &[f64], variant: TTestVariant) -> Result<TTestResult> {
    let (n_a, n_b) = (a.len(), b.len());
    let (mean_a, mean_b) = (mean(a), mean(b));

    let undefined = |df: f64| TTestResult {
        variant,
        statistic: f64::NAN,
        p_value: f64::NAN,
        degrees_of_freedom: df,
        n_a,
        n_b,
        mean_a,
        mean_b,
    };

    if n_a < 2 || n_b < 2 {
        log::warn!(
            "t-test needs at least two observations per group (got {n_a} and {n_b})"
        );
        return Ok(undefined(f64::NAN));
    }

    let (var_a, var_b) = (sample_variance(a, mean_a), sample_variance(b, mean_b));
    let (na, nb) = (n_a as f64, n_b as f64);

    let (std_err, df) = match variant {
        TTestVariant::Student => {
            let df = na + nb - 2.0;
            let pooled = ((na - 1.0) * var_a + (nb - 1.0) * var_b) / df;
            ((pooled * (1.0 / na + 1.0 / nb)).sqrt(), df)
        }
        TTestVariant::Welch => {
            let (sa, sb) = (var_a / na, var_b / nb);
            let df = (sa + sb).powi(2) / (sa.powi(2) / (na - 1.0) + sb.powi(2) / (nb - 1.0));
            ((sa + sb).sqrt(), df)
        }
    };

    if std_err <= 0.0 || !std_err.is_finite() || !df.is_finite() {
        log::warn!("t-test is undefined: both groups have zero variance");
        return Ok(undefined(df));
    }

    let statistic = (mean_a - mean_b) / std_err;
    let dist = StudentsT::new(0.0, 1.0, df)
        .map_err(|e| PipelineError::Statistics(format!("Invalid t distribution (df={df}): {e}")))?;
    let p_value = (2.0 * dist.sf(statistic.abs())).clamp(0.0, 1.0);

    Ok(TTestResult {
        variant,
        statistic,
        p_value,
        degrees_of_freedom: df,
        n_a,
        n_b,
        mean_a,
        mean_b,
    })
}
