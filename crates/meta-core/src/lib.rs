//! Shared Graph API plumbing for the Meta task crates.
//!
//! - [`GraphClient`]: URL composition, token attachment, JSON bodies.
//! - [`await_ready`]: container readiness polling.
//! - [`process_batch`]: sequential per-item execution with failure isolation.

mod error;
pub use error::{MetaError, Result};

mod config;
pub use config::{AuthStrategy, GraphConfig, PollPolicy, DEFAULT_API_VERSION, DEFAULT_BASE_URL};

mod client;
pub use client::{GraphClient, GraphRequest, GraphResponse, HttpTransport, Transport};

mod poll;
pub use poll::{PollState, await_ready, container_status};

mod batch;
pub use batch::process_batch;

pub use tokio_util::sync::CancellationToken;
