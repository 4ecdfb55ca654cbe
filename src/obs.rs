//! Optional observability helpers for binding calls.
//!
//! # Feature Flags
//!
//! - Enable `tracing` to emit structured spans named `oauth_bridge.call` with the `op`
//!   (operation) and `stage` (call site) fields.
//! - Enable `metrics` to increment the `oauth_bridge_call_total` counter for every
//!   attempt/success/failure, labeled by `op` + `outcome`.

mod metrics;
mod tracing;

pub use metrics::*;
pub use tracing::*;

// self
use crate::_prelude::*;

/// Binding operations observed per call.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum CallKind {
	/// Authorization dispatch across the host bridge.
	Authorize,
	/// Sign-out dispatch across the host bridge.
	Signout,
	/// Token-bearing action dispatch across the host bridge.
	ActionWithToken,
	/// Direct discovery-document fetch.
	Discover,
}
impl CallKind {
	/// Returns a stable label suitable for span or metric fields.
	pub const fn as_str(self) -> &'static str {
		match self {
			CallKind::Authorize => "authorize",
			CallKind::Signout => "signout",
			CallKind::ActionWithToken => "action_with_token",
			CallKind::Discover => "discover",
		}
	}
}
impl Display for CallKind {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(self.as_str())
	}
}

/// Outcome labels recorded for each attempt.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum CallOutcome {
	/// Entry to a binding operation.
	Attempt,
	/// Successful completion.
	Success,
	/// Failure propagated back to the caller.
	Failure,
}
impl CallOutcome {
	/// Returns a stable label suitable for span or metric fields.
	pub const fn as_str(self) -> &'static str {
		match self {
			CallOutcome::Attempt => "attempt",
			CallOutcome::Success => "success",
			CallOutcome::Failure => "failure",
		}
	}
}
impl Display for CallOutcome {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(self.as_str())
	}
}
