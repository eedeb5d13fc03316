use ndarray::Array2;

/// One long-form panel observation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PanelObs {
  pub unit: usize,
  pub time: usize,
  pub value: f64,
}

/// A balanced panel: one series per unit, equal length.
#[derive(Debug, Clone)]
pub struct PanelData {
  units: Vec<Vec<f64>>,
}

impl PanelData {
  /// Builds a panel from a wide matrix with rows as time periods and
  /// columns as units.
  ///
  /// # Panics
  /// Panics on an empty matrix or non-finite entries.
  pub fn from_wide(wide: &Array2<f64>) -> Self {
    assert!(
      wide.nrows() > 0 && wide.ncols() > 0,
      "panel matrix must be non-empty"
    );
    assert!(
      wide.iter().all(|v| v.is_finite()),
      "panel matrix must contain only finite values"
    );

    let units = wide
      .columns()
      .into_iter()
      .map(|col| col.to_vec())
      .collect();
    Self { units }
  }

  pub fn n_units(&self) -> usize {
    self.units.len()
  }

  pub fn n_periods(&self) -> usize {
    self.units[0].len()
  }

  /// Per-unit series, in column order of the wide matrix.
  pub fn units(&self) -> &[Vec<f64>] {
    &self.units
  }

  /// Long-form records by row/column enumeration of the wide matrix.
  ///
  /// Every element of the wide matrix maps to exactly one record.
  pub fn to_long(&self) -> Vec<PanelObs> {
    let mut long = Vec::with_capacity(self.n_units() * self.n_periods());
    for time in 0..self.n_periods() {
      for (unit, series) in self.units.iter().enumerate() {
        long.push(PanelObs {
          unit,
          time,
          value: series[time],
        });
      }
    }
    long
  }
}
