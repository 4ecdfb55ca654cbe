//! Host-bridge seam: the runtime's capability layer, invoked by operation name with a JSON
//! payload.
//!
//! The bridge is opaque to this crate. [`HostBridge`] is its entire visible contract: one
//! asynchronous dispatch per call, resolving exactly once to the runtime's success payload or
//! to a [`BridgeError`] passed through verbatim. Whatever the runtime does behind the seam
//! (token storage, webview control, redirect interception, retries) is none of this crate's
//! business, and no timeout or retry assumptions are baked in here.

// self
use crate::_prelude::*;

/// Single-shot future returned by host-bridge dispatches.
pub type BridgeFuture<'a> = Pin<Box<dyn Future<Output = Result<Value, BridgeError>> + 'a + Send>>;

/// Named OAuth operations understood by the host runtime.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum BridgeOp {
	/// Runs the authorization flow for a resolved provider configuration.
	Authorize,
	/// Ends the provider session for a resolved provider configuration.
	Signout,
	/// Calls an endpoint with the current access token attached by the runtime.
	ActionWithToken,
}
impl BridgeOp {
	/// Returns the wire-level operation name dispatched to the runtime.
	pub const fn as_str(self) -> &'static str {
		match self {
			BridgeOp::Authorize => "oauth.authorize",
			BridgeOp::Signout => "oauth.signout",
			BridgeOp::ActionWithToken => "oauth.actionWithToken",
		}
	}
}
impl Display for BridgeOp {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(self.as_str())
	}
}

/// Abstraction over the host runtime's capability-exposure layer.
///
/// Implementations must be `Send + Sync + 'static` so a single bridge handle (typically behind
/// `Arc<T>`) can serve every call the binding issues. The returned future must resolve exactly
/// once; the binding never retries, deduplicates, or cancels an in-flight dispatch.
pub trait HostBridge
where
	Self: 'static + Send + Sync,
{
	/// Dispatches `op` with `payload` to the runtime.
	fn call(&self, op: BridgeOp, payload: Value) -> BridgeFuture<'_>;
}

/// Opaque failure reported by the host bridge.
///
/// The binding performs no interpretation: `message` and the optional structured `detail`
/// payload are whatever the runtime supplied, surfaced to the caller untouched.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, ThisError)]
#[error("{message}")]
pub struct BridgeError {
	/// Human-readable failure description supplied by the runtime.
	pub message: String,
	/// Structured failure payload supplied by the runtime, when present.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub detail: Option<Value>,
}
impl BridgeError {
	/// Creates an error carrying only a message.
	pub fn new(message: impl Into<String>) -> Self {
		Self { message: message.into(), detail: None }
	}

	/// Attaches the runtime's structured failure payload.
	pub fn with_detail(mut self, detail: Value) -> Self {
		self.detail = Some(detail);

		self
	}
}

/// Opaque endpoint descriptor for token-bearing actions.
///
/// Runtimes accept either a plain URL string or a structured descriptor here; the binding
/// forwards whichever shape the caller supplies without imposing a schema.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Endpoint(pub Value);
impl From<&str> for Endpoint {
	fn from(url: &str) -> Self {
		Self(Value::String(url.to_owned()))
	}
}
impl From<String> for Endpoint {
	fn from(url: String) -> Self {
		Self(Value::String(url))
	}
}
impl From<Value> for Endpoint {
	fn from(descriptor: Value) -> Self {
		Self(descriptor)
	}
}
