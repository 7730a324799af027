//! Mean and RMS sigma with null-value exclusion

/// Mean and population sigma of the non-null samples.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct MeanSigma {
    /// Arithmetic mean (0 when no good samples)
    pub mean: f64,
    /// Population sigma `sqrt(E[x^2] - E[x]^2)` (0 for fewer than 2 samples)
    pub sigma: f64,
    /// Number of samples not equal to the null value
    pub good_count: usize,
}

/// Compute mean and RMS sigma in a single pass.
///
/// Samples equal to `null` are skipped. Accumulation is done in `f64`, so
/// this works for every integer sample type as well as for `f64` data.
///
/// # Arguments
///
/// * `values` - Samples to summarize
/// * `null` - Optional value marking missing samples
///
/// # Examples
///
/// ```
/// use cosmetica_stats::mean_sigma;
///
/// let ms = mean_sigma(&[2u16, 4, 4, 4, 5, 5, 7, 9], None);
/// assert_eq!(ms.mean, 5.0);
/// assert_eq!(ms.sigma, 2.0);
/// ```
pub fn mean_sigma<V>(values: &[V], null: Option<V>) -> MeanSigma
where
    V: Copy + PartialEq + Into<f64>,
{
    let mut good = 0usize;
    let mut sum = 0.0f64;
    let mut sum2 = 0.0f64;
    for &v in values {
        if null == Some(v) {
            continue;
        }
        let x: f64 = v.into();
        good += 1;
        sum += x;
        sum2 += x * x;
    }

    match good {
        0 => MeanSigma::default(),
        1 => MeanSigma {
            mean: sum,
            sigma: 0.0,
            good_count: 1,
        },
        n => {
            let mean = sum / n as f64;
            let var = (sum2 / n as f64 - mean * mean).max(0.0);
            MeanSigma {
                mean,
                sigma: var.sqrt(),
                good_count: n,
            }
        }
    }
}
