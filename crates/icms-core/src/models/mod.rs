//! Data models for ICMS auditing.

pub mod category;
pub mod config;
pub mod result;
pub mod values;

pub use category::Category;
pub use config::{IcmsConfig, MandatoryPolicy};
pub use result::IcmsResult;
pub use values::CategoryValues;
