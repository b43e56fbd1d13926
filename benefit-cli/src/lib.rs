pub mod app;
pub mod form;
pub mod logging;
pub mod report;
pub mod utils;
