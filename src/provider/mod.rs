mod types;

pub use types::*;

#[cfg(feature = "google")]
pub mod google;
pub mod stub;
