#![forbid(unsafe_code)]

pub mod assessor;
pub mod model;
pub mod time;

pub use time::Clock;
