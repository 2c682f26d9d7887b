//! Cashflow projection and investment appraisal for sustainability actions.
//!
//! The numeric core ([`variable::resolve`], [`projection::compute_roi`]) is pure and
//! never fails; [`RoiError`] only arises around it, when building a projection run
//! or writing its output.

pub mod error;
pub mod format;
pub mod logger;
pub mod portfolio;
pub mod projection;
pub mod settings;
pub mod variable;

pub use error::RoiError;
pub use projection::{compute_roi, compute_roi_at, RoiResult, RoiYearRow};
