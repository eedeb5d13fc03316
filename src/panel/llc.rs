use statrs::distribution::ContinuousCDF;
use statrs::distribution::Normal;

use super::data::PanelData;
use crate::table::difference;
use crate::unitroot::adf::AdfConfig;
use crate::unitroot::regression::LagOrder;
use crate::unitroot::regression::Regression;
use crate::unitroot::regression::bartlett_long_run_variance;
use crate::unitroot::regression::remove_deterministics;
use crate::unitroot::regression::residualize;
use crate::unitroot::regression::schwert_lag_ceiling;
use crate::unitroot::regression::select_lag;
use crate::unitroot::regression::validate_series;

/// Result of the Levin-Lin-Chu pooled panel unit-root test.
#[derive(Debug, Clone, Copy)]
pub struct LlcResult {
  /// Mean/variance-adjusted statistic, standard normal under the null.
  pub statistic: f64,
  /// Unadjusted t-statistic on the pooled coefficient.
  pub pooled_t: f64,
  /// Pooled coefficient on the lagged level.
  pub delta: f64,
  pub p_value: f64,
  pub reject_unit_root: bool,
}

// Levin-Lin-Chu (2002), Table 2: mean and standard-deviation adjustments
// indexed by the average effective sample size, one column per
// deterministic specification.
const ADJ_T: [f64; 12] = [
  25.0, 30.0, 35.0, 40.0, 45.0, 50.0, 60.0, 70.0, 80.0, 90.0, 100.0, 250.0,
];

const ADJ_MU_NONE: [f64; 12] = [
  0.004, 0.003, 0.002, 0.002, 0.001, 0.001, 0.001, 0.000, 0.000, 0.000, 0.000, 0.000,
];
const ADJ_SIG_NONE: [f64; 12] = [
  1.049, 1.035, 1.027, 1.021, 1.017, 1.014, 1.011, 1.008, 1.007, 1.006, 1.005, 1.001,
];

const ADJ_MU_CONST: [f64; 12] = [
  -0.554, -0.546, -0.541, -0.537, -0.533, -0.531, -0.527, -0.524, -0.521, -0.520, -0.518,
  -0.509,
];
const ADJ_SIG_CONST: [f64; 12] = [
  0.919, 0.889, 0.867, 0.850, 0.837, 0.826, 0.810, 0.798, 0.789, 0.782, 0.776, 0.742,
];

const ADJ_MU_TREND: [f64; 12] = [
  -0.703, -0.674, -0.653, -0.637, -0.624, -0.614, -0.598, -0.587, -0.578, -0.571, -0.566,
  -0.533,
];
const ADJ_SIG_TREND: [f64; 12] = [
  0.912, 0.871, 0.840, 0.816, 0.797, 0.781, 0.756, 0.738, 0.724, 0.713, 0.704, 0.661,
];

fn asymptotic_adjustment(regression: Regression) -> (f64, f64) {
  match regression {
    Regression::NoConstant => (0.0, 1.0),
    Regression::Constant => (-0.5, std::f64::consts::FRAC_1_SQRT_2),
    Regression::ConstantTrend => (-0.5, 0.630),
  }
}

/// Interpolates the LLC mean/std adjustment at the average effective
/// sample size `t_bar`.
pub(crate) fn llc_adjustment(regression: Regression, t_bar: f64) -> (f64, f64) {
  let (mu_tab, sig_tab) = match regression {
    Regression::NoConstant => (&ADJ_MU_NONE, &ADJ_SIG_NONE),
    Regression::Constant => (&ADJ_MU_CONST, &ADJ_SIG_CONST),
    Regression::ConstantTrend => (&ADJ_MU_TREND, &ADJ_SIG_TREND),
  };

  if t_bar <= ADJ_T[0] {
    return (mu_tab[0], sig_tab[0]);
  }
  let last = ADJ_T.len() - 1;
  if t_bar >= ADJ_T[last] {
    // Beyond the table, interpolate linearly in 1/T toward the asymptote.
    let (mu_inf, sig_inf) = asymptotic_adjustment(regression);
    let w = (ADJ_T[last] / t_bar).clamp(0.0, 1.0);
    return (
      mu_inf + w * (mu_tab[last] - mu_inf),
      sig_inf + w * (sig_tab[last] - sig_inf),
    );
  }

  let hi = ADJ_T.iter().position(|t| *t >= t_bar).unwrap_or(last);
  let lo = hi - 1;
  let w = (t_bar - ADJ_T[lo]) / (ADJ_T[hi] - ADJ_T[lo]);
  (
    mu_tab[lo] + w * (mu_tab[hi] - mu_tab[lo]),
    sig_tab[lo] + w * (sig_tab[hi] - sig_tab[lo]),
  )
}

struct UnitTerms {
  e_tilde: Vec<f64>,
  v_tilde: Vec<f64>,
  sd_ratio: f64,
}

// Per-unit step of the LLC procedure: orthogonalize Δy_t and y_{t-1}
// against the deterministics and lagged differences, normalize both by the
// unit innovation standard error, and record the long-run/innovation
// standard-deviation ratio.
fn unit_terms(y: &[f64], cfg: AdfConfig) -> UnitTerms {
  validate_series(y, 20);

  let n = y.len();
  let hard_cap = n.saturating_sub(10);
  let lags = match cfg.lag_order {
    LagOrder::Fixed(p) => {
      assert!(p <= hard_cap, "fixed lag order too large for sample");
      p
    }
    _ => {
      let ceiling = cfg
        .max_lags
        .unwrap_or_else(|| schwert_lag_ceiling(n))
        .min(hard_cap);
      select_lag(y, cfg.regression, cfg.lag_order, ceiling)
    }
  };

  let dy = difference(y);
  let mut dy_t = Vec::with_capacity(dy.len() - lags);
  let mut level = Vec::with_capacity(dy.len() - lags);
  let mut x = Vec::with_capacity(dy.len() - lags);
  for t in lags..dy.len() {
    let mut row = Vec::with_capacity(cfg.regression.n_deterministic() + lags);
    match cfg.regression {
      Regression::NoConstant => {}
      Regression::Constant => row.push(1.0),
      Regression::ConstantTrend => {
        row.push(1.0);
        row.push((t + 1) as f64);
      }
    }
    for i in 1..=lags {
      row.push(dy[t - i]);
    }

    dy_t.push(dy[t]);
    level.push(y[t]);
    x.push(row);
  }

  let e = residualize(&dy_t, &x);
  let v = residualize(&level, &x);

  // Unit innovation variance from regressing e on v.
  let svv = v.iter().map(|a| a * a).sum::<f64>();
  assert!(svv > 0.0, "degenerate lagged-level series in LLC step");
  let delta_i = e.iter().zip(&v).map(|(a, b)| a * b).sum::<f64>() / svv;
  let rss = e
    .iter()
    .zip(&v)
    .map(|(a, b)| {
      let r = a - delta_i * b;
      r * r
    })
    .sum::<f64>();
  let dof = e.len().saturating_sub(1).max(1) as f64;
  let sigma_e = (rss / dof).sqrt();
  assert!(
    sigma_e.is_finite() && sigma_e > 0.0,
    "zero innovation variance in LLC step"
  );

  // Long-run over innovation standard deviation of Δy.
  let dy_adj = remove_deterministics(&dy, cfg.regression);
  let bandwidth = (3.21 * (n as f64).powf(1.0 / 3.0)).floor() as usize;
  let lrv = bartlett_long_run_variance(&dy_adj, bandwidth.min(dy_adj.len() - 1));

  UnitTerms {
    e_tilde: e.iter().map(|a| a / sigma_e).collect(),
    v_tilde: v.iter().map(|a| a / sigma_e).collect(),
    sd_ratio: lrv.sqrt() / sigma_e,
  }
}

/// Levin-Lin-Chu pooled panel unit-root test.
///
/// Pools the normalized per-unit regressions and applies the LLC mean and
/// standard-deviation adjustments, yielding a statistic that is standard
/// normal under the common unit-root null.
///
/// # Panics
/// Panics on invalid inputs (fewer than two units, short or non-finite
/// series, invalid config).
pub fn levin_lin_chu_test(panel: &PanelData, cfg: AdfConfig) -> LlcResult {
  assert!(panel.n_units() >= 2, "LLC requires at least two units");
  assert!(
    cfg.alpha > 0.0 && cfg.alpha < 1.0,
    "alpha must be in (0, 1)"
  );

  let n_units = panel.n_units() as f64;
  let mut e_all = Vec::new();
  let mut v_all = Vec::new();
  let mut sd_ratio_sum = 0.0;

  for y in panel.units() {
    let terms = unit_terms(y, cfg);
    sd_ratio_sum += terms.sd_ratio;
    e_all.extend(terms.e_tilde);
    v_all.extend(terms.v_tilde);
  }

  let s_hat = sd_ratio_sum / n_units;
  let nobs_total = e_all.len() as f64;
  let t_bar = nobs_total / n_units;

  let svv = v_all.iter().map(|a| a * a).sum::<f64>();
  assert!(svv > 0.0, "degenerate pooled regression in LLC");
  let delta = e_all.iter().zip(&v_all).map(|(a, b)| a * b).sum::<f64>() / svv;
  let rss = e_all
    .iter()
    .zip(&v_all)
    .map(|(a, b)| {
      let r = a - delta * b;
      r * r
    })
    .sum::<f64>();
  let sigma2_eps = rss / nobs_total;
  let se_delta = (sigma2_eps / svv).sqrt();
  let pooled_t = delta / se_delta;

  let (mu_adj, sig_adj) = llc_adjustment(cfg.regression, t_bar);
  let statistic =
    (pooled_t - n_units * t_bar * s_hat * se_delta * mu_adj / sigma2_eps) / sig_adj;

  let normal = Normal::new(0.0, 1.0).expect("standard normal must be valid");
  let p_value = normal.cdf(statistic).clamp(0.0, 1.0);

  LlcResult {
    statistic,
    pooled_t,
    delta,
    p_value,
    reject_unit_root: p_value < cfg.alpha,
  }
}

#[cfg(test)]
mod tests {
  use approx::assert_abs_diff_eq;
  use ndarray::Array2;
  use rand::SeedableRng;
  use rand::rngs::StdRng;
  use rand_distr::Distribution;
  use rand_distr::Normal;

  use super::AdfConfig;
  use super::PanelData;
  use super::Regression;
  use super::levin_lin_chu_test;
  use super::llc_adjustment;

  fn ar1_panel(phi: f64, t: usize, n: usize, seed: u64) -> PanelData {
    let normal = Normal::new(0.0, 1.0).unwrap();
    let mut rng = StdRng::seed_from_u64(seed);

    let mut wide = Array2::zeros((t, n));
    for i in 0..n {
      for row in 1..t {
        wide[(row, i)] = phi * wide[(row - 1, i)] + normal.sample(&mut rng);
      }
    }
    PanelData::from_wide(&wide)
  }

  #[test]
  fn adjustment_is_exact_at_table_nodes() {
    let (mu, sig) = llc_adjustment(Regression::Constant, 50.0);
    assert_abs_diff_eq!(mu, -0.531, epsilon = 1e-12);
    assert_abs_diff_eq!(sig, 0.826, epsilon = 1e-12);
  }

  #[test]
  fn adjustment_interpolates_between_nodes() {
    let (mu, sig) = llc_adjustment(Regression::Constant, 55.0);
    assert!(mu < -0.527 && mu > -0.531, "mu out of bracket: {mu}");
    assert!(sig < 0.826 && sig > 0.810, "sigma out of bracket: {sig}");
  }

  #[test]
  fn adjustment_tends_to_asymptote() {
    let (mu, sig) = llc_adjustment(Regression::Constant, 1e9);
    assert_abs_diff_eq!(mu, -0.5, epsilon = 1e-3);
    assert_abs_diff_eq!(sig, std::f64::consts::FRAC_1_SQRT_2, epsilon = 1e-3);
  }

  #[test]
  fn llc_rejects_for_stationary_panel() {
    let panel = ar1_panel(0.5, 200, 10, 17);
    let res = levin_lin_chu_test(&panel, AdfConfig::default());

    assert!(res.statistic < -3.0, "adjusted statistic too mild: {res:?}");
    assert!(res.reject_unit_root, "{res:?}");
    assert!(res.p_value < 0.01, "{res:?}");
  }

  #[test]
  fn llc_keeps_null_for_random_walk_panel() {
    let panel = ar1_panel(1.0, 200, 10, 17);
    let res = levin_lin_chu_test(&panel, AdfConfig::default());
    assert!(res.p_value > 0.001, "p-value implausibly small: {res:?}");
    assert!(
      res.statistic.abs() < 4.0,
      "adjusted statistic should be near standard normal: {res:?}"
    );
  }

  #[test]
  #[should_panic(expected = "at least two units")]
  fn llc_rejects_single_unit_panel() {
    let panel = PanelData::from_wide(&Array2::zeros((50, 1)));
    let _ = levin_lin_chu_test(&panel, AdfConfig::default());
  }
}
