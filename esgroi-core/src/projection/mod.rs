pub mod builder;
pub mod engine;
pub mod metrics;
pub mod ramp;
pub mod result;

pub use builder::ProjectionBuilder;
pub use engine::{compute_roi, compute_roi_at, ProjectionEngine};
pub use result::{RoiResult, RoiYearRow};
