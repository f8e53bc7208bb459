//! Core building blocks shared by every calculator
//!
//! - **clock**: Injected "current time"
//! - **dates**: Start-date parsing and days-until-start resolution
//! - **money**: Currency clamping and display rounding

pub mod clock;
pub mod dates;
pub mod money;
