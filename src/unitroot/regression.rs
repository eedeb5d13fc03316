use nalgebra::DMatrix;
use nalgebra::DVector;

use crate::table::difference;

/// Deterministic terms included in a unit-root test regression.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Regression {
  NoConstant,
  Constant,
  ConstantTrend,
}

impl Regression {
  pub(crate) fn n_deterministic(self) -> usize {
    match self {
      Regression::NoConstant => 0,
      Regression::Constant => 1,
      Regression::ConstantTrend => 2,
    }
  }
}

/// Lag-order choice for the augmented regression.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LagOrder {
  Fixed(usize),
  Aic,
  Bic,
}

/// Asymptotic critical values at the 1%, 5% and 10% levels.
#[derive(Debug, Clone, Copy)]
pub struct CriticalValues {
  pub pct1: f64,
  pub pct5: f64,
  pub pct10: f64,
}

impl CriticalValues {
  pub fn at(self, alpha: f64) -> f64 {
    if alpha <= 0.01 {
      self.pct1
    } else if alpha <= 0.05 {
      self.pct5
    } else {
      self.pct10
    }
  }
}

/// MacKinnon-style asymptotic Dickey-Fuller critical values.
pub fn adf_critical_values(regression: Regression) -> CriticalValues {
  match regression {
    Regression::NoConstant => CriticalValues {
      pct1: -2.58,
      pct5: -1.95,
      pct10: -1.62,
    },
    Regression::Constant => CriticalValues {
      pct1: -3.43,
      pct5: -2.86,
      pct10: -2.57,
    },
    Regression::ConstantTrend => CriticalValues {
      pct1: -3.96,
      pct5: -3.41,
      pct10: -3.13,
    },
  }
}

pub(crate) fn validate_series(y: &[f64], min_n: usize) {
  assert!(
    y.len() >= min_n,
    "series must have at least {min_n} observations"
  );
  assert!(
    y.iter().all(|v| v.is_finite()),
    "series must contain only finite values"
  );
}

/// Schwert's rule-of-thumb ceiling for automatic lag selection.
pub fn schwert_lag_ceiling(n: usize) -> usize {
  if n <= 1 {
    return 0;
  }
  (12.0 * (n as f64 / 100.0).powf(0.25)).floor() as usize
}

#[derive(Debug, Clone)]
pub(crate) struct Ols {
  pub beta: Vec<f64>,
  pub std_err: Vec<f64>,
  pub residuals: Vec<f64>,
  pub sse: f64,
  pub nobs: usize,
  pub k: usize,
}

/// Least squares via SVD; coefficient covariance from V Σ⁻² Vᵀ.
///
/// # Panics
/// Panics on a ragged or rank-deficient design, or when nobs ≤ k.
pub(crate) fn least_squares(y: &[f64], x: &[Vec<f64>]) -> Ols {
  let n = y.len();
  assert!(n > 0, "least squares requires a non-empty response");
  assert_eq!(n, x.len(), "response/design row mismatch");
  let k = x[0].len();
  assert!(k > 0, "least squares requires at least one regressor");
  assert!(
    x.iter().all(|row| row.len() == k),
    "design matrix must be rectangular"
  );
  assert!(n > k, "least squares requires nobs > regressors");

  let x_mat = DMatrix::from_fn(n, k, |i, j| x[i][j]);
  let y_vec = DVector::from_row_slice(y);

  let svd = x_mat.clone().svd(true, true);
  let s_max = svd.singular_values.max();
  let tol = s_max * 1e-12;
  assert!(
    svd.singular_values.iter().all(|s| *s > tol),
    "singular design matrix"
  );

  let beta_vec = match svd.solve(&y_vec, tol) {
    Ok(b) => b,
    Err(msg) => panic!("least squares failed: {msg}"),
  };

  let fitted = &x_mat * &beta_vec;
  let residuals: Vec<f64> = (y_vec - fitted).iter().copied().collect();
  let sse = residuals.iter().map(|u| u * u).sum::<f64>();
  let sigma2 = (sse / (n - k) as f64).max(0.0);

  let Some(v_t) = svd.v_t.as_ref() else {
    panic!("least squares failed: missing right singular vectors")
  };
  let mut std_err = vec![0.0; k];
  for j in 0..k {
    let mut xtx_inv_jj = 0.0;
    for r in 0..svd.singular_values.len() {
      let v = v_t[(r, j)];
      xtx_inv_jj += v * v / (svd.singular_values[r] * svd.singular_values[r]);
    }
    std_err[j] = (sigma2 * xtx_inv_jj).max(0.0).sqrt();
  }

  Ols {
    beta: beta_vec.iter().copied().collect(),
    std_err,
    residuals,
    sse,
    nobs: n,
    k,
  }
}

/// Residuals of `lhs` after projecting out `x`; identity when `x` is empty.
pub(crate) fn residualize(lhs: &[f64], x: &[Vec<f64>]) -> Vec<f64> {
  if x.is_empty() || x[0].is_empty() {
    return lhs.to_vec();
  }
  least_squares(lhs, x).residuals
}

/// Dickey-Fuller design: Δy_t on deterministics, y_{t-1} and lagged Δy.
///
/// Returns the response, the design rows and the column index of y_{t-1}.
pub(crate) fn adf_design(
  y: &[f64],
  lags: usize,
  regression: Regression,
) -> (Vec<f64>, Vec<Vec<f64>>, usize) {
  validate_series(y, 3 + lags);
  let dy = difference(y);
  assert!(dy.len() > lags, "too many lags for sample length");

  let n_det = regression.n_deterministic();
  let n_rows = dy.len() - lags;
  let mut lhs = Vec::with_capacity(n_rows);
  let mut rhs = Vec::with_capacity(n_rows);

  for t in lags..dy.len() {
    let mut row = Vec::with_capacity(n_det + 1 + lags);
    match regression {
      Regression::NoConstant => {}
      Regression::Constant => row.push(1.0),
      Regression::ConstantTrend => {
        row.push(1.0);
        row.push((t + 1) as f64);
      }
    }
    // dy index t corresponds to original time t+1, so y[t] is the lagged level.
    row.push(y[t]);
    for i in 1..=lags {
      row.push(dy[t - i]);
    }

    lhs.push(dy[t]);
    rhs.push(row);
  }

  (lhs, rhs, n_det)
}

#[derive(Debug, Clone, Copy)]
pub(crate) struct AdfFit {
  pub statistic: f64,
  pub nobs: usize,
}

pub(crate) fn fit_adf(y: &[f64], lags: usize, regression: Regression) -> AdfFit {
  let (lhs, rhs, gamma_idx) = adf_design(y, lags, regression);
  let fit = least_squares(&lhs, &rhs);

  let se = fit.std_err[gamma_idx];
  let statistic = if se > 0.0 {
    fit.beta[gamma_idx] / se
  } else {
    f64::NAN
  };

  AdfFit {
    statistic,
    nobs: fit.nobs,
  }
}

fn information_criterion(order: LagOrder, sse: f64, nobs: usize, k: usize) -> f64 {
  let n = nobs as f64;
  let penalty = match order {
    LagOrder::Aic => 2.0 * k as f64,
    LagOrder::Bic => k as f64 * n.ln(),
    LagOrder::Fixed(_) => 0.0,
  };
  n * (sse / n).ln() + penalty
}

/// Minimum-IC lag search over `0..=ceiling`.
pub(crate) fn select_lag(
  y: &[f64],
  regression: Regression,
  order: LagOrder,
  ceiling: usize,
) -> usize {
  if let LagOrder::Fixed(p) = order {
    return p;
  }

  let mut best = (0usize, f64::INFINITY);
  for lag in 0..=ceiling {
    let (lhs, rhs, _) = adf_design(y, lag, regression);
    if lhs.len() <= rhs[0].len() {
      break;
    }
    let fit = least_squares(&lhs, &rhs);
    let ic = information_criterion(order, fit.sse, fit.nobs, fit.k);
    if ic < best.1 {
      best = (lag, ic);
    }
  }
  best.0
}

/// Bartlett-kernel long-run variance of a (mean-adjusted) series.
pub(crate) fn bartlett_long_run_variance(u: &[f64], bandwidth: usize) -> f64 {
  assert!(!u.is_empty(), "long-run variance of an empty series");
  let n = u.len();
  let n_f = n as f64;

  let gamma0 = u.iter().map(|v| v * v).sum::<f64>() / n_f;
  let mut lr_var = gamma0;
  for j in 1..=bandwidth.min(n - 1) {
    let weight = 1.0 - j as f64 / (bandwidth as f64 + 1.0);
    let cov = u[j..]
      .iter()
      .zip(&u[..n - j])
      .map(|(a, b)| a * b)
      .sum::<f64>()
      / n_f;
    lr_var += 2.0 * weight * cov;
  }

  if lr_var.is_finite() && lr_var > 0.0 {
    lr_var
  } else {
    gamma0.max(1e-12)
  }
}

/// Removes the deterministic component implied by `regression`.
pub(crate) fn remove_deterministics(y: &[f64], regression: Regression) -> Vec<f64> {
  match regression {
    Regression::NoConstant => y.to_vec(),
    Regression::Constant => {
      let mean = y.iter().sum::<f64>() / y.len() as f64;
      y.iter().map(|v| v - mean).collect()
    }
    Regression::ConstantTrend => {
      let x: Vec<Vec<f64>> = (0..y.len()).map(|t| vec![1.0, (t + 1) as f64]).collect();
      residualize(y, &x)
    }
  }
}
