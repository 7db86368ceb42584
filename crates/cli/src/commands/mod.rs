pub mod analyze;
pub mod classify;
pub mod config;
pub mod detectors;
pub mod util;

pub use analyze::*;
pub use classify::*;
pub use config::*;
pub use detectors::*;
pub use util::*;
