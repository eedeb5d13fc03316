//! Named numeric series columns.
//!
//! Columns are independent: differencing shortens a column by one
//! observation, so a table may hold columns of different lengths.

/// A single named numeric series.
#[derive(Debug, Clone)]
pub struct SeriesColumn {
  pub name: String,
  pub values: Vec<f64>,
}

/// An ordered collection of named numeric columns.
#[derive(Debug, Clone, Default)]
pub struct SeriesTable {
  columns: Vec<SeriesColumn>,
}

impl SeriesTable {
  /// Builds a table from `(name, values)` pairs, keeping insertion order.
  ///
  /// # Panics
  /// Panics on duplicate column names or non-finite values.
  pub fn from_columns<I, S>(columns: I) -> Self
  where
    I: IntoIterator<Item = (S, Vec<f64>)>,
    S: Into<String>,
  {
    let columns: Vec<SeriesColumn> = columns
      .into_iter()
      .map(|(name, values)| SeriesColumn {
        name: name.into(),
        values,
      })
      .collect();

    for (i, col) in columns.iter().enumerate() {
      assert!(
        col.values.iter().all(|v| v.is_finite()),
        "column `{}` must contain only finite values",
        col.name
      );
      assert!(
        columns[..i].iter().all(|prev| prev.name != col.name),
        "duplicate column name `{}`",
        col.name
      );
    }

    Self { columns }
  }

  /// Number of columns.
  pub fn len(&self) -> usize {
    self.columns.len()
  }

  pub fn is_empty(&self) -> bool {
    self.columns.is_empty()
  }

  /// Columns in insertion order.
  pub fn columns(&self) -> &[SeriesColumn] {
    &self.columns
  }

  /// Looks up a column by name.
  pub fn column(&self, name: &str) -> Option<&SeriesColumn> {
    self.columns.iter().find(|c| c.name == name)
  }
}

/// First differences of a series, one observation shorter than the input.
pub fn difference(y: &[f64]) -> Vec<f64> {
  y.windows(2).map(|w| w[1] - w[0]).collect()
}

#[cfg(test)]
mod tests {
  use approx::assert_abs_diff_eq;

  use super::SeriesTable;
  use super::difference;

  #[test]
  fn table_keeps_insertion_order_and_uneven_lengths() {
    let table = SeriesTable::from_columns([
      ("gdp", vec![1.0, 2.0, 3.0]),
      ("cpi", vec![0.5, 0.7]),
    ]);

    assert_eq!(table.len(), 2);
    assert_eq!(table.columns()[0].name, "gdp");
    assert_eq!(table.column("cpi").unwrap().values.len(), 2);
    assert!(table.column("unemployment").is_none());
  }

  #[test]
  #[should_panic(expected = "duplicate column name")]
  fn table_rejects_duplicate_names() {
    let _ = SeriesTable::from_columns([("x", vec![1.0]), ("x", vec![2.0])]);
  }

  #[test]
  #[should_panic(expected = "finite values")]
  fn table_rejects_non_finite_values() {
    let _ = SeriesTable::from_columns([("x", vec![1.0, f64::NAN])]);
  }

  #[test]
  fn difference_shortens_by_one() {
    let d = difference(&[1.0, 4.0, 9.0, 16.0]);
    assert_eq!(d.len(), 3);
    assert_abs_diff_eq!(d[0], 3.0, epsilon = 1e-12);
    assert_abs_diff_eq!(d[2], 7.0, epsilon = 1e-12);
  }
}
