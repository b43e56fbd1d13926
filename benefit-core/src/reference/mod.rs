//! Reference data supplied to the calculator as configuration.

pub mod builtin;
pub mod registry;

pub use registry::{ReferenceDataError, YearParameterRegistry};
