//! Discovery transport primitives and the typed provider-metadata document.
//!
//! Discovery is the one operation that bypasses the host bridge: provider metadata is a plain
//! public HTTP resource, so the binding fetches it directly through the [`DiscoveryHttpClient`]
//! seam instead of asking the runtime for a privileged capability. The `reqwest` feature ships
//! [`ReqwestDiscoveryClient`] as the default transport; custom transports implement the trait
//! and hand the client raw document bodies.

// self
use crate::_prelude::*;

type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Single-shot future returned by discovery fetches, resolving to the raw response body.
pub type DiscoveryFuture<'a> = Pin<Box<dyn Future<Output = Result<String, DiscoveryError>> + 'a + Send>>;

/// Abstraction over HTTP transports capable of fetching discovery documents.
///
/// The trait is the binding's only dependency on an HTTP stack. One GET per call, no retries,
/// no redirect policy imposed here; whatever classification the transport reports flows to the
/// caller unchanged as a [`DiscoveryError`].
pub trait DiscoveryHttpClient
where
	Self: 'static + Send + Sync,
{
	/// Issues a GET request against `endpoint` and resolves with the raw response body.
	fn get(&self, endpoint: &Url) -> DiscoveryFuture<'_>;
}

/// Failure reported by the discovery HTTP layer, surfaced to callers verbatim.
#[derive(Debug, ThisError)]
pub enum DiscoveryError {
	/// The endpoint answered with a non-success status code.
	#[error("Discovery endpoint returned HTTP {status}.")]
	Status {
		/// HTTP status code returned by the endpoint.
		status: u16,
		/// Response body, when it could be read.
		body: Option<String>,
	},
	/// The transport gave up waiting for the endpoint.
	#[error("Request timed out while fetching the discovery document.")]
	Timeout {
		/// Transport-specific timeout error.
		#[source]
		source: BoxError,
	},
	/// The transport failed below the HTTP layer (DNS, TCP, TLS).
	#[error("Network error occurred while fetching the discovery document.")]
	Transport {
		/// Transport-specific network error.
		#[source]
		source: BoxError,
	},
	/// The document body could not be parsed as provider metadata.
	#[error("Discovery document is not valid provider metadata.")]
	Parse {
		/// Structured parsing failure naming the offending path.
		#[source]
		source: serde_path_to_error::Error<serde_json::Error>,
	},
}
impl DiscoveryError {
	/// Wraps a transport-specific timeout error.
	pub fn timeout(src: impl 'static + Send + Sync + std::error::Error) -> Self {
		Self::Timeout { source: Box::new(src) }
	}

	/// Wraps a transport-specific network error.
	pub fn transport(src: impl 'static + Send + Sync + std::error::Error) -> Self {
		Self::Transport { source: Box::new(src) }
	}
}
#[cfg(feature = "reqwest")]
impl From<reqwest::Error> for DiscoveryError {
	fn from(e: reqwest::Error) -> Self {
		if e.is_timeout() {
			return Self::timeout(e);
		}

		Self::transport(e)
	}
}

/// Typed view of an OpenID Connect provider-metadata document.
///
/// Every field is optional; the raw-body contract of the discover operation stays with the
/// caller, and this type is a convenience parse on top of it. Fields outside the recognized
/// subset are retained in `extra`.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct DiscoveryDocument {
	/// Issuer identifier asserted by the provider.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub issuer: Option<Url>,
	/// Authorization endpoint.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub authorization_endpoint: Option<Url>,
	/// Token endpoint.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub token_endpoint: Option<Url>,
	/// UserInfo endpoint.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub userinfo_endpoint: Option<Url>,
	/// JSON Web Key Set document location.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub jwks_uri: Option<Url>,
	/// RP-initiated logout endpoint.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub end_session_endpoint: Option<Url>,
	/// Remaining metadata fields, untouched.
	#[serde(flatten)]
	pub extra: Map<String, Value>,
}
impl DiscoveryDocument {
	/// Parses a raw discovery response body into the typed document.
	pub fn from_json(body: &str) -> Result<Self, DiscoveryError> {
		let mut deserializer = serde_json::Deserializer::from_str(body);

		serde_path_to_error::deserialize(&mut deserializer)
			.map_err(|source| DiscoveryError::Parse { source })
	}
}

/// Thin wrapper around [`ReqwestClient`] so shared discovery HTTP behavior lives in one place.
///
/// Discovery documents sit behind plain GET endpoints that occasionally redirect, so the
/// default reqwest redirect policy is kept. Responses are classified no further than the
/// transport itself reports: non-success statuses, timeouts, and connection failures each map
/// onto their [`DiscoveryError`] variant.
#[cfg(feature = "reqwest")]
#[derive(Clone, Default)]
pub struct ReqwestDiscoveryClient(pub ReqwestClient);
#[cfg(feature = "reqwest")]
impl ReqwestDiscoveryClient {
	/// Wraps an existing reqwest [`ReqwestClient`].
	pub fn with_client(client: ReqwestClient) -> Self {
		Self(client)
	}
}
#[cfg(feature = "reqwest")]
impl AsRef<ReqwestClient> for ReqwestDiscoveryClient {
	fn as_ref(&self) -> &ReqwestClient {
		&self.0
	}
}
#[cfg(feature = "reqwest")]
impl std::ops::Deref for ReqwestDiscoveryClient {
	type Target = ReqwestClient;

	fn deref(&self) -> &Self::Target {
		&self.0
	}
}
#[cfg(feature = "reqwest")]
impl DiscoveryHttpClient for ReqwestDiscoveryClient {
	fn get(&self, endpoint: &Url) -> DiscoveryFuture<'_> {
		let client = self.0.clone();
		let endpoint = endpoint.clone();

		Box::pin(async move {
			let response = client.get(endpoint).send().await.map_err(DiscoveryError::from)?;
			let status = response.status();

			if !status.is_success() {
				let body = response.text().await.ok();

				return Err(DiscoveryError::Status { status: status.as_u16(), body });
			}

			response.text().await.map_err(DiscoveryError::from)
		})
	}
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	#[test]
	fn document_parses_recognized_and_extra_fields() {
		let body = r#"{
			"issuer": "https://accounts.example.com",
			"authorization_endpoint": "https://accounts.example.com/o/oauth2/auth",
			"token_endpoint": "https://accounts.example.com/o/oauth2/token",
			"jwks_uri": "https://accounts.example.com/oauth2/certs",
			"scopes_supported": ["openid", "email"]
		}"#;
		let document = DiscoveryDocument::from_json(body)
			.expect("Well-formed metadata should parse successfully.");

		assert_eq!(
			document.authorization_endpoint.as_ref().map(Url::as_str),
			Some("https://accounts.example.com/o/oauth2/auth"),
		);
		assert_eq!(
			document.extra.get("scopes_supported"),
			Some(&serde_json::json!(["openid", "email"])),
		);
		assert!(document.userinfo_endpoint.is_none());
	}

	#[test]
	fn parse_failures_name_the_offending_path() {
		let err = DiscoveryDocument::from_json(r#"{"token_endpoint": 42}"#)
			.expect_err("Non-string endpoint should fail to parse.");

		match err {
			DiscoveryError::Parse { source } =>
				assert_eq!(source.path().to_string(), "token_endpoint"),
			other => panic!("Unexpected error variant: {other:?}."),
		}
	}

	#[test]
	fn status_errors_format_the_code() {
		let err = DiscoveryError::Status { status: 404, body: Some("not found".into()) };

		assert_eq!(err.to_string(), "Discovery endpoint returned HTTP 404.");
	}
}
