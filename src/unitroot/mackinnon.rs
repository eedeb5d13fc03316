use statrs::distribution::ContinuousCDF;
use statrs::distribution::Normal;

use super::regression::Regression;

// MacKinnon (1994) response-surface coefficients for the single-series
// Dickey-Fuller t-distribution. Small-p polynomials apply at or below the
// switch point, large-p polynomials above it.
struct TauSurface {
  switch: f64,
  min: f64,
  max: f64,
  small_p: [f64; 3],
  large_p: [f64; 4],
}

const fn surface(regression: Regression) -> TauSurface {
  match regression {
    Regression::NoConstant => TauSurface {
      switch: -1.04,
      min: -19.04,
      max: f64::INFINITY,
      small_p: [0.6344, 1.2378, 0.032496],
      large_p: [0.4797, 0.93557, -0.06999, 0.033066],
    },
    Regression::Constant => TauSurface {
      switch: -1.61,
      min: -18.83,
      max: 2.74,
      small_p: [2.1659, 1.4412, 0.038269],
      large_p: [1.7339, 0.93202, -0.12745, -0.010368],
    },
    Regression::ConstantTrend => TauSurface {
      switch: -2.89,
      min: -16.18,
      max: 0.70,
      small_p: [3.2512, 1.6047, 0.049588],
      large_p: [2.5261, 0.61654, -0.37956, -0.060285],
    },
  }
}

/// Approximate asymptotic p-value for a Dickey-Fuller t-statistic.
///
/// Evaluates MacKinnon's polynomial in the statistic and maps the result
/// through the standard normal CDF. Statistics beyond the tabulated range
/// clamp to 0 or 1.
pub fn mackinnon_pvalue(statistic: f64, regression: Regression) -> f64 {
  assert!(statistic.is_finite(), "p-value of a non-finite statistic");

  let tau = surface(regression);
  if statistic > tau.max {
    return 1.0;
  }
  if statistic < tau.min {
    return 0.0;
  }

  let z = if statistic <= tau.switch {
    let [c0, c1, c2] = tau.small_p;
    c0 + statistic * (c1 + statistic * c2)
  } else {
    let [c0, c1, c2, c3] = tau.large_p;
    c0 + statistic * (c1 + statistic * (c2 + statistic * c3))
  };

  let normal = Normal::new(0.0, 1.0).expect("standard normal must be valid");
  normal.cdf(z).clamp(0.0, 1.0)
}

#[cfg(test)]
mod tests {
  use approx::assert_abs_diff_eq;

  use super::Regression;
  use super::mackinnon_pvalue;

  #[test]
  fn pvalue_matches_five_percent_critical_values() {
    assert_abs_diff_eq!(
      mackinnon_pvalue(-1.95, Regression::NoConstant),
      0.05,
      epsilon = 3e-3
    );
    assert_abs_diff_eq!(
      mackinnon_pvalue(-2.86, Regression::Constant),
      0.05,
      epsilon = 3e-3
    );
    assert_abs_diff_eq!(
      mackinnon_pvalue(-3.41, Regression::ConstantTrend),
      0.05,
      epsilon = 3e-3
    );
  }

  #[test]
  fn pvalue_is_monotone_in_the_statistic() {
    let mut last = 0.0;
    for i in 0..120 {
      let stat = -12.0 + 0.1 * i as f64;
      let p = mackinnon_pvalue(stat, Regression::Constant);
      assert!(p >= last - 1e-9, "non-monotone at {stat}: {p} < {last}");
      last = p;
    }
  }

  #[test]
  fn pvalue_clamps_outside_tabulated_range() {
    assert_eq!(mackinnon_pvalue(-25.0, Regression::Constant), 0.0);
    assert_eq!(mackinnon_pvalue(5.0, Regression::Constant), 1.0);
  }
}
