//! Client-side OAuth bindings for hybrid app runtimes: resolve named provider configurations
//! once, then dispatch authorize, sign-out, and token-bearing calls across an opaque host
//! bridge, or fetch provider discovery metadata directly over HTTP.

#![deny(clippy::all, missing_docs, unused_crate_dependencies)]

pub mod bridge;
pub mod client;
pub mod discovery;
pub mod error;
pub mod obs;
pub mod provider;
#[cfg(any(test, feature = "test"))]
pub mod _preludet {
	//! Convenience re-exports and test doubles for integration tests; enabled via `cfg(test)` or
	//! the `test` crate feature.

	pub use crate::_prelude::*;

	// self
	use crate::{
		bridge::{BridgeError, BridgeFuture, BridgeOp, HostBridge},
		discovery::{DiscoveryError, DiscoveryFuture, DiscoveryHttpClient},
	};

	/// Scripted outcome replayed by [`RecordingBridge`] for every dispatch.
	#[derive(Clone, Debug)]
	pub enum BridgeScript {
		/// Resolve every call with the given payload.
		Succeed(Value),
		/// Reject every call with the given error.
		Fail(BridgeError),
	}

	/// Host-bridge double that records every dispatch and replays a scripted outcome.
	#[derive(Debug)]
	pub struct RecordingBridge {
		script: BridgeScript,
		calls: Mutex<Vec<(BridgeOp, Value)>>,
	}
	impl RecordingBridge {
		/// Creates a bridge that resolves every call with `payload`.
		pub fn succeeding(payload: Value) -> Self {
			Self { script: BridgeScript::Succeed(payload), calls: Mutex::new(Vec::new()) }
		}

		/// Creates a bridge that rejects every call with `error`.
		pub fn failing(error: BridgeError) -> Self {
			Self { script: BridgeScript::Fail(error), calls: Mutex::new(Vec::new()) }
		}

		/// Returns the recorded `(operation, payload)` dispatches in order.
		pub fn calls(&self) -> Vec<(BridgeOp, Value)> {
			self.calls.lock().clone()
		}
	}
	impl HostBridge for RecordingBridge {
		fn call(&self, op: BridgeOp, payload: Value) -> BridgeFuture<'_> {
			self.calls.lock().push((op, payload));

			let script = self.script.clone();

			Box::pin(async move {
				match script {
					BridgeScript::Succeed(payload) => Ok(payload),
					BridgeScript::Fail(error) => Err(error),
				}
			})
		}
	}

	/// Discovery double for tests that must never touch the network; panics on any request.
	#[derive(Clone, Copy, Debug, Default)]
	pub struct NoDiscoveryClient;
	impl DiscoveryHttpClient for NoDiscoveryClient {
		fn get(&self, endpoint: &Url) -> DiscoveryFuture<'_> {
			panic!("Unexpected discovery request to {endpoint}.");
		}
	}

	/// Discovery double that rejects every request with a scripted transport failure.
	#[derive(Clone, Debug)]
	pub struct FailingDiscoveryClient {
		message: String,
	}
	impl FailingDiscoveryClient {
		/// Creates a client that fails every GET with `message`.
		pub fn new(message: impl Into<String>) -> Self {
			Self { message: message.into() }
		}
	}
	impl DiscoveryHttpClient for FailingDiscoveryClient {
		fn get(&self, _endpoint: &Url) -> DiscoveryFuture<'_> {
			let message = self.message.clone();

			Box::pin(async move { Err(DiscoveryError::transport(ScriptedFailure(message))) })
		}
	}

	#[derive(Debug)]
	struct ScriptedFailure(String);
	impl Display for ScriptedFailure {
		fn fmt(&self, f: &mut Formatter) -> FmtResult {
			f.write_str(&self.0)
		}
	}
	impl std::error::Error for ScriptedFailure {}
}

mod _prelude {
	pub use std::{
		fmt::{Debug, Display, Formatter, Result as FmtResult},
		future::Future,
		pin::Pin,
		sync::Arc,
	};

	pub use parking_lot::Mutex;
	#[cfg(feature = "reqwest")]
	pub use reqwest::Client as ReqwestClient;
	pub use serde::{Deserialize, Serialize};
	pub use serde_json::{Map, Value};
	pub use thiserror::Error as ThisError;
	pub use url::Url;

	pub use crate::error::{Error, Result};
}

#[cfg(feature = "reqwest")] pub use reqwest;
pub use serde_json;
pub use url;
#[cfg(test)] use {color_eyre as _, httpmock as _, tokio as _};
