pub mod calculation;
pub mod patient;

pub use calculation::StoredCalculation;
pub use patient::Patient;
