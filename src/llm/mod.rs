#[cfg(feature = "client")]
pub mod client;
pub mod types;

#[cfg(feature = "client")]
pub use client::*;
pub use types::*;
