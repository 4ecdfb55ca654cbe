// std
use std::sync::Arc;
// crates.io
use parking_lot::Mutex;
// self
use oauth_bridge::{
	bridge::{BridgeError, BridgeFuture, BridgeOp, HostBridge},
	client::OauthClient,
	discovery::{DiscoveryFuture, DiscoveryHttpClient},
	error::Error,
	provider::{ProviderConfig, ProviderName, ProviderRegistry},
	serde_json::{self, Value, json},
	url::Url,
};

/// Bridge double that records dispatches and replays one scripted outcome.
struct ScriptedBridge {
	outcome: Result<Value, BridgeError>,
	calls: Mutex<Vec<(BridgeOp, Value)>>,
}
impl ScriptedBridge {
	fn succeeding(payload: Value) -> Self {
		Self { outcome: Ok(payload), calls: Mutex::new(Vec::new()) }
	}

	fn failing(error: BridgeError) -> Self {
		Self { outcome: Err(error), calls: Mutex::new(Vec::new()) }
	}

	fn calls(&self) -> Vec<(BridgeOp, Value)> {
		self.calls.lock().clone()
	}
}
impl HostBridge for ScriptedBridge {
	fn call(&self, op: BridgeOp, payload: Value) -> BridgeFuture<'_> {
		self.calls.lock().push((op, payload));

		let outcome = self.outcome.clone();

		Box::pin(async move { outcome })
	}
}

/// Discovery double for suites that must never touch the network.
struct NoNetwork;
impl DiscoveryHttpClient for NoNetwork {
	fn get(&self, endpoint: &Url) -> DiscoveryFuture<'_> {
		panic!("Unexpected discovery request to {endpoint}.");
	}
}

fn provider(name: &str) -> ProviderConfig {
	ProviderConfig::new(ProviderName::new(name).expect("Provider fixture name should be valid."))
}

fn build_client(
	providers: ProviderRegistry,
	bridge: ScriptedBridge,
) -> (OauthClient<ScriptedBridge, NoNetwork>, Arc<ScriptedBridge>) {
	let bridge = Arc::new(bridge);
	let client = OauthClient::with_http_client(providers, Arc::clone(&bridge), NoNetwork);

	(client, bridge)
}

#[tokio::test]
async fn authorize_and_signout_wrap_the_resolved_config() {
	let github = provider("github")
		.with_extra("client_id", Value::String("gh-456".into()))
		.with_extra("redirect_uri", Value::String("myapp://oauth".into()));
	let registry = ProviderRegistry::new([provider("google"), github.clone()]);
	let (client, bridge) =
		build_client(registry, ScriptedBridge::succeeding(json!({ "state": "ok" })));

	client.authorize("github").await.expect("Authorize should succeed.");
	client.signout("github").await.expect("Signout should succeed.");

	let calls = bridge.calls();
	let expected_config =
		serde_json::to_value(&github).expect("Provider fixture should serialize.");

	assert_eq!(calls.len(), 2);
	assert_eq!(calls[0].0, BridgeOp::Authorize);
	assert_eq!(calls[0].1, json!({ "config": expected_config }));
	assert_eq!(calls[1].0, BridgeOp::Signout);
	assert_eq!(calls[1].1, json!({ "config": expected_config }));
}

#[tokio::test]
async fn duplicate_names_resolve_to_the_first_entry() {
	let first = provider("google").with_extra("client_id", Value::String("first".into()));
	let shadowed = provider("google").with_extra("client_id", Value::String("second".into()));
	let (client, bridge) = build_client(
		ProviderRegistry::new([first.clone(), shadowed]),
		ScriptedBridge::succeeding(Value::Null),
	);

	client.authorize("google").await.expect("Authorize should succeed.");

	assert_eq!(
		bridge.calls()[0].1["config"],
		serde_json::to_value(&first).expect("Provider fixture should serialize."),
	);
}

#[tokio::test]
async fn action_with_token_forwards_structured_descriptors() {
	let descriptor = json!({ "url": "https://api.example.com/me", "method": "POST" });
	let (client, bridge) = build_client(
		ProviderRegistry::default(),
		ScriptedBridge::succeeding(json!({ "body": "{}" })),
	);

	client
		.action_with_token(descriptor.clone())
		.await
		.expect("Token-bearing action should succeed.");

	let calls = bridge.calls();

	assert_eq!(calls[0].0, BridgeOp::ActionWithToken);
	assert_eq!(calls[0].1, json!({ "endpoint": descriptor }));
}

#[tokio::test]
async fn bridge_errors_keep_their_structured_detail() {
	let registry = ProviderRegistry::new([provider("google")]);
	let (client, _bridge) = build_client(
		registry,
		ScriptedBridge::failing(
			BridgeError::new("Authorization window was dismissed")
				.with_detail(json!({ "type": "EXPECTED_FAILURE", "subtype": "USER_CANCELLED" })),
		),
	);
	let err = client.signout("google").await.expect_err("Scripted failure should surface.");

	assert_eq!(err.to_string(), "Authorization window was dismissed");

	match err {
		Error::Bridge(bridge_error) =>
			assert_eq!(bridge_error.detail, Some(json!({
				"type": "EXPECTED_FAILURE",
				"subtype": "USER_CANCELLED"
			}))),
		other => panic!("Unexpected error variant: {other:?}."),
	}
}

#[tokio::test]
async fn resolution_failure_precedes_any_dispatch() {
	let (client, bridge) =
		build_client(ProviderRegistry::default(), ScriptedBridge::succeeding(Value::Null));
	let err = client
		.authorize("missing-provider")
		.await
		.expect_err("Authorize must fail for unknown providers.");

	assert_eq!(
		err.to_string(),
		"Could not find a configuration for a provider called: missing-provider",
	);
	assert!(bridge.calls().is_empty());
}
