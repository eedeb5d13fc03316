use statrs::distribution::ChiSquared;
use statrs::distribution::ContinuousCDF;
use statrs::distribution::Normal;

use super::data::PanelData;
use crate::unitroot::adf::AdfConfig;
use crate::unitroot::adf::adf_test;

// Guards against ln(0) / infinite normal quantiles when a unit's ADF
// statistic falls outside the tabulated p-value range.
const P_FLOOR: f64 = 1e-16;

/// Result of the Maddala-Wu Fisher chi-square combination test.
#[derive(Debug, Clone, Copy)]
pub struct FisherResult {
  /// -2 Σ ln p_i.
  pub statistic: f64,
  /// Degrees of freedom (2N).
  pub df: usize,
  pub p_value: f64,
  pub reject_unit_root: bool,
}

/// Result of the Choi inverse-normal combination test.
#[derive(Debug, Clone, Copy)]
pub struct ChoiResult {
  /// N^{-1/2} Σ Φ⁻¹(p_i).
  pub statistic: f64,
  pub p_value: f64,
  pub reject_unit_root: bool,
}

fn unit_pvalues(panel: &PanelData, cfg: AdfConfig) -> Vec<f64> {
  panel
    .units()
    .iter()
    .map(|y| adf_test(y, cfg).p_value.clamp(P_FLOOR, 1.0 - P_FLOOR))
    .collect()
}

/// Maddala-Wu panel unit-root test: Fisher combination of the per-unit
/// ADF p-values, chi-square with 2N degrees of freedom under the null.
///
/// # Panics
/// Panics on invalid per-unit inputs, as [`adf_test`] does.
pub fn maddala_wu_test(panel: &PanelData, cfg: AdfConfig) -> FisherResult {
  let pvalues = unit_pvalues(panel, cfg);

  let statistic = -2.0 * pvalues.iter().map(|p| p.ln()).sum::<f64>();
  let df = 2 * pvalues.len();
  let chi2 = ChiSquared::new(df as f64).expect("chi-square df must be positive");
  let p_value = (1.0 - chi2.cdf(statistic)).clamp(0.0, 1.0);

  FisherResult {
    statistic,
    df,
    p_value,
    reject_unit_root: p_value < cfg.alpha,
  }
}

/// Choi panel unit-root test: inverse-normal combination of the per-unit
/// ADF p-values, standard normal under the null.
///
/// # Panics
/// Panics on invalid per-unit inputs, as [`adf_test`] does.
pub fn choi_test(panel: &PanelData, cfg: AdfConfig) -> ChoiResult {
  let pvalues = unit_pvalues(panel, cfg);
  let n = pvalues.len() as f64;

  let normal = Normal::new(0.0, 1.0).expect("standard normal must be valid");
  let statistic = pvalues
    .iter()
    .map(|p| normal.inverse_cdf(*p))
    .sum::<f64>()
    / n.sqrt();
  let p_value = normal.cdf(statistic).clamp(0.0, 1.0);

  ChoiResult {
    statistic,
    p_value,
    reject_unit_root: p_value < cfg.alpha,
  }
}
