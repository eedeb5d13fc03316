//! Unit-root testing layer.
//!
//! The augmented Dickey-Fuller regression is solved in-crate (nalgebra
//! least squares, tabulated asymptotic critical values, MacKinnon p-value
//! surface); the column-wise and panel utilities are thin layers over it.

mod mackinnon;
pub(crate) mod regression;

pub mod adf;

pub use mackinnon::mackinnon_pvalue;
pub use regression::CriticalValues;
pub use regression::LagOrder;
pub use regression::Regression;
pub use regression::adf_critical_values;
pub use regression::schwert_lag_ceiling;
