mod error;
mod municipal_rates;
mod reference_file;

pub use error::ReferenceLoaderError;
pub use municipal_rates::{MunicipalRateLoader, MunicipalRateRecord};
pub use reference_file::{ReferenceFile, ReferenceFileLoader};
