//! Panel unit-root tests over a wide matrix of units.

mod data;
mod fisher;
mod llc;

pub use data::PanelData;
pub use data::PanelObs;
pub use fisher::ChoiResult;
pub use fisher::FisherResult;
pub use fisher::choi_test;
pub use fisher::maddala_wu_test;
pub use llc::LlcResult;
pub use llc::levin_lin_chu_test;

use ndarray::Array2;
use prettytable::Table;
use prettytable::row;
use tracing::debug;

use crate::unitroot::adf::AdfConfig;

/// Results of the three panel unit-root tests on one panel.
#[derive(Debug, Clone, Copy)]
pub struct PanelReport {
  pub maddala_wu: FisherResult,
  pub choi: ChoiResult,
  pub levin_lin_chu: LlcResult,
}

impl PanelReport {
  /// Renders the report as a summary table.
  pub fn to_table(&self) -> Table {
    let mut table = Table::new();
    table.add_row(row!["Test", "Statistic", "p-value", "Reject unit root"]);
    table.add_row(row![
      format!("Maddala-Wu (chi-square, {} df)", self.maddala_wu.df),
      format!("{:.4}", self.maddala_wu.statistic),
      format!("{:.4}", self.maddala_wu.p_value),
      self.maddala_wu.reject_unit_root
    ]);
    table.add_row(row![
      "Choi (inverse normal)",
      format!("{:.4}", self.choi.statistic),
      format!("{:.4}", self.choi.p_value),
      self.choi.reject_unit_root
    ]);
    table.add_row(row![
      "Levin-Lin-Chu (adjusted t)",
      format!("{:.4}", self.levin_lin_chu.statistic),
      format!("{:.4}", self.levin_lin_chu.p_value),
      self.levin_lin_chu.reject_unit_root
    ]);
    table
  }

  /// Prints the summary table to stdout.
  pub fn print(&self) {
    self.to_table().printstd();
  }
}

/// Reshapes a wide matrix (rows as time periods, columns as units) into a
/// panel and runs the Maddala-Wu, Choi and Levin-Lin-Chu tests on it.
///
/// # Panics
/// Panics on invalid inputs, as the underlying tests do.
pub fn panel_unit_root_tests(wide: &Array2<f64>, cfg: AdfConfig) -> PanelReport {
  let panel = PanelData::from_wide(wide);
  debug!(
    units = panel.n_units(),
    periods = panel.n_periods(),
    "running panel unit-root tests"
  );

  PanelReport {
    maddala_wu: maddala_wu_test(&panel, cfg),
    choi: choi_test(&panel, cfg),
    levin_lin_chu: levin_lin_chu_test(&panel, cfg),
  }
}

#[cfg(test)]
mod tests {
  use ndarray::Array2;
  use rand::SeedableRng;
  use rand::rngs::StdRng;
  use rand_distr::Distribution;
  use rand_distr::Normal;

  use super::AdfConfig;
  use super::panel_unit_root_tests;

  fn stationary_panel(t: usize, n: usize, seed: u64) -> Array2<f64> {
    let normal = Normal::new(0.0, 1.0).unwrap();
    let mut rng = StdRng::seed_from_u64(seed);

    let mut wide = Array2::zeros((t, n));
    for i in 0..n {
      for row in 1..t {
        wide[(row, i)] = 0.4 * wide[(row - 1, i)] + normal.sample(&mut rng);
      }
    }
    wide
  }

  #[test]
  fn runner_agrees_across_tests_on_a_clear_panel() {
    let wide = stationary_panel(250, 6, 101);
    let report = panel_unit_root_tests(&wide, AdfConfig::default());

    assert!(report.maddala_wu.reject_unit_root);
    assert!(report.choi.reject_unit_root);
    assert!(report.levin_lin_chu.reject_unit_root);
  }

  #[test]
  fn summary_table_has_header_and_one_row_per_test() {
    let wide = stationary_panel(250, 6, 101);
    let report = panel_unit_root_tests(&wide, AdfConfig::default());

    let table = report.to_table();
    assert_eq!(table.len(), 4);

    let rendered = table.to_string();
    assert!(rendered.contains("Maddala-Wu"));
    assert!(rendered.contains("Choi"));
    assert!(rendered.contains("Levin-Lin-Chu"));
  }
}
