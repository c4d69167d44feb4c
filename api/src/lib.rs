pub static API_VERSION: &str = env!("CARGO_PKG_VERSION");
pub static RUSTC_VERSION: &str = env!("RUSTC_VERSION");

pub mod buffer;
pub mod config;
pub mod diagnostics;
pub mod events;
pub mod extract;
pub mod layout;
pub mod registry;
