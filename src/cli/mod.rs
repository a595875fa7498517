//! CLI command implementations

mod check;
mod context;
mod init;
mod progress;
mod run;
pub mod style;

pub use check::run_check;
pub use init::run_init;
pub use run::run_run;
