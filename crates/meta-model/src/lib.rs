//! Plain domain types shared by the Graph API client and the task operations.
//!
//! Nothing in this crate performs I/O: it only describes what travels between
//! the host, the workflows in `meta-exec` and the provider.

mod domain;
pub use domain::*;
