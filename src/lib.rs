//! autodeps - scheduled dependency bumps as automerging pull requests
//!
//! Runs the configured upgrade tools, and when they change anything,
//! commits the result to a branch derived from the current revision,
//! opens a pull request and enables automerge on it. The two remote
//! writes are polled with a bounded backoff because GitHub does not make
//! a freshly pushed branch or a freshly opened PR visible immediately.
//!
//! ```text
//! toolchain → bump → format → diff guard → git push → PR (retry) → automerge (retry)
//! ```

pub mod auth;
pub mod bump;
pub mod config;
pub mod error;
pub mod git;
pub mod pipeline;
pub mod platform;
pub mod process;
pub mod progress;
pub mod publish;
pub mod retry;
pub mod toolchain;
pub mod types;
