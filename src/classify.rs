//! Column-wise stationarity classification and sequential differencing.

use tracing::debug;

use crate::table::SeriesTable;
use crate::table::difference;
use crate::unitroot::adf::AdfConfig;
use crate::unitroot::adf::adf_test;

/// Stationarity classification of a single series.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stationarity {
  Stationary,
  NonStationary,
}

/// One classified series: name, test statistic, threshold and verdict.
#[derive(Debug, Clone)]
pub struct SeriesVerdict {
  pub name: String,
  pub statistic: f64,
  pub critical_value: f64,
  pub status: Stationarity,
}

/// Classification of every column, plus retests of first differences for
/// the columns that failed at levels.
#[derive(Debug, Clone)]
pub struct StationarityReport {
  pub levels: Vec<SeriesVerdict>,
  pub first_differences: Vec<SeriesVerdict>,
}

impl StationarityReport {
  /// Names of the columns that are non-stationary at levels.
  pub fn non_stationary(&self) -> Vec<&str> {
    self
      .levels
      .iter()
      .filter(|v| v.status == Stationarity::NonStationary)
      .map(|v| v.name.as_str())
      .collect()
  }
}

/// Outcome of a single underlying unit-root test call.
#[derive(Debug, Clone, Copy)]
struct TestOutcome {
  statistic: f64,
  critical_value: f64,
  stationary: bool,
}

fn adf_outcome(y: &[f64], cfg: AdfConfig) -> TestOutcome {
  let res = adf_test(y, cfg);
  TestOutcome {
    statistic: res.statistic,
    critical_value: res.critical_values.at(cfg.alpha),
    stationary: res.reject_unit_root,
  }
}

fn verdict(name: &str, out: TestOutcome) -> SeriesVerdict {
  SeriesVerdict {
    name: name.to_string(),
    statistic: out.statistic,
    critical_value: out.critical_value,
    status: if out.stationary {
      Stationarity::Stationary
    } else {
      Stationarity::NonStationary
    },
  }
}

// The tester seam keeps the control flow independent of the actual test,
// which is what the call-count tests exercise.
fn classify_with(
  table: &SeriesTable,
  tester: &mut dyn FnMut(&[f64]) -> TestOutcome,
) -> StationarityReport {
  let mut levels = Vec::with_capacity(table.len());
  let mut first_differences = Vec::new();

  for col in table.columns() {
    let level = tester(&col.values);
    levels.push(verdict(&col.name, level));

    if !level.stationary {
      let diffed = tester(&difference(&col.values));
      first_differences.push(verdict(&col.name, diffed));
    }
  }

  StationarityReport {
    levels,
    first_differences,
  }
}

/// Classifies each column as stationary or non-stationary with one ADF call,
/// retesting the first difference of every column that fails at levels.
pub fn classify_stationarity(table: &SeriesTable, cfg: AdfConfig) -> StationarityReport {
  classify_with(table, &mut |y| adf_outcome(y, cfg))
}

/// How many differences one column received, and where it ended up.
#[derive(Debug, Clone)]
pub struct DifferencingRecord {
  pub name: String,
  pub differences: usize,
  pub stationary: bool,
}

/// Differenced table plus the per-column differencing log.
#[derive(Debug, Clone)]
pub struct DifferencingOutcome {
  pub table: SeriesTable,
  pub log: Vec<DifferencingRecord>,
}

fn difference_with(
  table: &SeriesTable,
  max_diff: usize,
  tester: &mut dyn FnMut(&[f64]) -> TestOutcome,
) -> DifferencingOutcome {
  let mut values: Vec<Vec<f64>> = table.columns().iter().map(|c| c.values.clone()).collect();
  let mut counts = vec![0usize; values.len()];
  let mut settled = vec![false; values.len()];

  let mut pass = 0usize;
  loop {
    let mut still_failing = 0usize;
    for i in 0..values.len() {
      if settled[i] {
        continue;
      }
      if tester(&values[i]).stationary {
        settled[i] = true;
      } else {
        still_failing += 1;
      }
    }
    debug!(pass, still_failing, "differencing pass complete");

    if still_failing == 0 {
      break;
    }

    let mut progressed = false;
    for i in 0..values.len() {
      if !settled[i] && counts[i] < max_diff {
        values[i] = difference(&values[i]);
        counts[i] += 1;
        progressed = true;
      }
    }
    if !progressed {
      break;
    }
    pass += 1;
  }

  let log = table
    .columns()
    .iter()
    .enumerate()
    .map(|(i, col)| DifferencingRecord {
      name: col.name.clone(),
      differences: counts[i],
      stationary: settled[i],
    })
    .collect();

  let table = SeriesTable::from_columns(
    table
      .columns()
      .iter()
      .zip(values)
      .map(|(col, v)| (col.name.clone(), v)),
  );

  DifferencingOutcome { table, log }
}

/// Differences each column until it classifies stationary, up to `max_diff`
/// differences per column, stopping early once every column has settled.
pub fn difference_until_stationary(
  table: &SeriesTable,
  max_diff: usize,
  cfg: AdfConfig,
) -> DifferencingOutcome {
  difference_with(table, max_diff, &mut |y| adf_outcome(y, cfg))
}
