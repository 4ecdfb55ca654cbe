//! The provider resolver + dispatcher exposed to application code.

// self
use crate::{
	_prelude::*,
	bridge::{BridgeOp, Endpoint, HostBridge},
	discovery::{DiscoveryDocument, DiscoveryHttpClient},
	obs::{self, CallKind, CallOutcome, CallSpan},
	provider::{ProviderConfig, ProviderRegistry, ProviderSelector},
};
#[cfg(feature = "reqwest")] use crate::discovery::ReqwestDiscoveryClient;

#[cfg(feature = "reqwest")]
/// Client specialized for the crate's default reqwest discovery transport.
pub type ReqwestOauthClient<B> = OauthClient<B, ReqwestDiscoveryClient>;

/// Resolves provider selectors against the injected registry and dispatches OAuth operations.
///
/// The client owns the host-bridge handle, the discovery transport, and the read-only provider
/// registry so each operation stays a single resolve → validate → dispatch step. Every public
/// operation issues at most one asynchronous dispatch; locally-detected failures (unknown
/// provider name, missing discovery endpoint) resolve the returned future before any bridge or
/// network traffic happens.
pub struct OauthClient<B, D>
where
	B: ?Sized + HostBridge,
	D: ?Sized + DiscoveryHttpClient,
{
	/// Host-runtime bridge receiving authorize, sign-out, and token-bearing dispatches.
	pub bridge: Arc<B>,
	/// HTTP transport used for direct discovery-document fetches.
	pub http_client: Arc<D>,
	/// Ordered provider collection resolved against by name.
	pub providers: ProviderRegistry,
}
impl<B, D> OauthClient<B, D>
where
	B: ?Sized + HostBridge,
	D: ?Sized + DiscoveryHttpClient,
{
	/// Creates a client that reuses the caller-provided bridge + discovery transport pair.
	pub fn with_http_client(
		providers: ProviderRegistry,
		bridge: impl Into<Arc<B>>,
		http_client: impl Into<Arc<D>>,
	) -> Self {
		Self { bridge: bridge.into(), http_client: http_client.into(), providers }
	}

	/// Runs the host runtime's authorization flow for the selected provider.
	///
	/// The selector resolves to a concrete configuration first; the resolved configuration is
	/// then forwarded, unmodified, as the `config` payload field of the `oauth.authorize`
	/// bridge operation. The bridge's success payload or failure propagates verbatim.
	pub async fn authorize(&self, provider: impl Into<ProviderSelector>) -> Result<Value> {
		self.dispatch_config(CallKind::Authorize, BridgeOp::Authorize, provider.into()).await
	}

	/// Ends the host runtime's provider session for the selected provider.
	///
	/// Identical shape to [`authorize`](Self::authorize), dispatching `oauth.signout` instead.
	pub async fn signout(&self, provider: impl Into<ProviderSelector>) -> Result<Value> {
		self.dispatch_config(CallKind::Signout, BridgeOp::Signout, provider.into()).await
	}

	/// Calls `endpoint` with the current access token attached by the host runtime.
	///
	/// No provider resolution happens here: the endpoint descriptor is forwarded untouched as
	/// the `endpoint` payload field of `oauth.actionWithToken`, and attaching credentials is
	/// entirely the runtime's responsibility.
	pub async fn action_with_token(&self, endpoint: impl Into<Endpoint>) -> Result<Value> {
		const KIND: CallKind = CallKind::ActionWithToken;

		let span = CallSpan::new(KIND, "action_with_token");

		obs::record_call_outcome(KIND, CallOutcome::Attempt);

		let endpoint = endpoint.into();
		let result = span
			.instrument(async move {
				let payload = serde_json::json!({ "endpoint": endpoint });

				self.bridge.call(BridgeOp::ActionWithToken, payload).await.map_err(Error::from)
			})
			.await;

		record_result(KIND, &result);

		result
	}

	/// Fetches the selected provider's discovery document and returns the raw response body.
	///
	/// Requires the resolved configuration to declare a `discovery_endpoint`; otherwise the
	/// call fails with [`Error::MissingDiscoveryEndpoint`] and no request is issued. Exactly
	/// one GET is dispatched through the discovery transport, and its outcome (body or HTTP
	/// failure) passes through verbatim. Body shape is the caller's concern.
	pub async fn discover(&self, provider: impl Into<ProviderSelector>) -> Result<String> {
		const KIND: CallKind = CallKind::Discover;

		let span = CallSpan::new(KIND, "discover");

		obs::record_call_outcome(KIND, CallOutcome::Attempt);

		let selector = provider.into();
		let result = span.instrument(self.fetch_discovery(selector)).await;

		record_result(KIND, &result);

		result
	}

	/// Fetches and parses the selected provider's discovery document.
	///
	/// Convenience over [`discover`](Self::discover) with the same resolution and endpoint
	/// rules; the body is additionally parsed as OpenID Connect provider metadata.
	pub async fn discover_document(
		&self,
		provider: impl Into<ProviderSelector>,
	) -> Result<DiscoveryDocument> {
		const KIND: CallKind = CallKind::Discover;

		let span = CallSpan::new(KIND, "discover_document");

		obs::record_call_outcome(KIND, CallOutcome::Attempt);

		let selector = provider.into();
		let result = span
			.instrument(async move {
				let body = self.fetch_discovery(selector).await?;

				DiscoveryDocument::from_json(&body).map_err(Error::from)
			})
			.await;

		record_result(KIND, &result);

		result
	}

	/// Shared resolve → dispatch step for the bridge operations that carry a configuration.
	async fn dispatch_config(
		&self,
		kind: CallKind,
		op: BridgeOp,
		selector: ProviderSelector,
	) -> Result<Value> {
		let span = CallSpan::new(kind, kind.as_str());

		obs::record_call_outcome(kind, CallOutcome::Attempt);

		let result = span
			.instrument(async move {
				let config = self.providers.resolve(selector)?;
				let payload = serde_json::json!({ "config": config });

				self.bridge.call(op, payload).await.map_err(Error::from)
			})
			.await;

		record_result(kind, &result);

		result
	}

	async fn fetch_discovery(&self, selector: ProviderSelector) -> Result<String> {
		let config = self.providers.resolve(selector)?;
		let endpoint = resolve_discovery_endpoint(&config)?;

		self.http_client.get(endpoint).await.map_err(Error::from)
	}
}
#[cfg(feature = "reqwest")]
impl<B> OauthClient<B, ReqwestDiscoveryClient>
where
	B: HostBridge,
{
	/// Creates a client with the crate's default reqwest discovery transport.
	pub fn new(providers: ProviderRegistry, bridge: impl Into<Arc<B>>) -> Self {
		Self::with_http_client(providers, bridge, ReqwestDiscoveryClient::default())
	}
}
impl<B, D> Clone for OauthClient<B, D>
where
	B: ?Sized + HostBridge,
	D: ?Sized + DiscoveryHttpClient,
{
	fn clone(&self) -> Self {
		Self {
			bridge: Arc::clone(&self.bridge),
			http_client: Arc::clone(&self.http_client),
			providers: self.providers.clone(),
		}
	}
}
impl<B, D> Debug for OauthClient<B, D>
where
	B: ?Sized + HostBridge,
	D: ?Sized + DiscoveryHttpClient,
{
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("OauthClient").field("providers", &self.providers).finish()
	}
}

fn resolve_discovery_endpoint(config: &ProviderConfig) -> Result<&Url> {
	config.discovery_endpoint.as_ref().ok_or(Error::MissingDiscoveryEndpoint)
}

fn record_result<T>(kind: CallKind, result: &Result<T>) {
	match result {
		Ok(_) => obs::record_call_outcome(kind, CallOutcome::Success),
		Err(_) => obs::record_call_outcome(kind, CallOutcome::Failure),
	}
}
