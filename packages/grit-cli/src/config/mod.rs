pub mod xmb;

pub use xmb::{XmbConfig, XmbJob, STDOUT_OUTPUT};
