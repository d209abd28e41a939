#![deny(clippy::all)]

/**
 * Grit CLI
 *
 * Command line front end for exporting resource documents as XMB
 */
pub use grit;

pub mod config;
pub mod perform_xmb;

/// CLI version
pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
