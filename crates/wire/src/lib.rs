// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Wire format for job trees exchanged with the bounded entry point.
//!
//! Field names carry a trailing underscore (`id_`, `status_`, `jobs_`, ...).
//! Encoding is total; decoding is lenient by default and rebuilds the job
//! variant from the `jobType_` tag, then replays the wire status through the
//! job's transitions.

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

mod decode;
mod encode;
mod error;
pub mod fields;
mod replay;
mod schema;

pub use decode::{from_json_str, reconstruct, ReconstructOptions};
pub use encode::{encode, to_json_string};
pub use error::WireError;
pub use replay::replay_status;
