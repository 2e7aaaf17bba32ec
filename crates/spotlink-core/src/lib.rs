pub mod config;
pub mod cost;
pub mod error;
pub mod spot;

pub use config::*;
pub use cost::*;
pub use error::*;
pub use spot::*;
