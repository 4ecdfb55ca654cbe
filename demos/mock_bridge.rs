//! Demonstrates wiring the binding to an in-process host bridge.
//!
//! 1. Implement [`HostBridge`] for whatever dispatches into your runtime; here the bridge
//!    answers every operation with a canned payload.
//! 2. Load the provider registry from the JSON block your app config ships.
//! 3. Drive authorize, token-bearing actions, and sign-out through [`OauthClient`] and let
//!    bridge outcomes (success or failure) propagate verbatim.

// crates.io
use color_eyre::Result;
// self
use oauth_bridge::{
	bridge::{BridgeError, BridgeFuture, BridgeOp, HostBridge},
	client::OauthClient,
	discovery::{DiscoveryFuture, DiscoveryHttpClient},
	provider::ProviderRegistry,
	serde_json::{Value, json},
	url::Url,
};

const PROVIDERS_JSON: &str = r#"[
	{
		"name": "google",
		"client_id": "demo-client.apps.example.com",
		"scopes": ["openid", "email"],
		"discovery_endpoint": "https://accounts.google.com/.well-known/openid-configuration"
	},
	{
		"name": "github",
		"client_id": "demo-gh-client"
	}
]"#;

#[tokio::main]
async fn main() -> Result<()> {
	color_eyre::install()?;

	let providers: ProviderRegistry = oauth_bridge::serde_json::from_str(PROVIDERS_JSON)?;
	let client = OauthClient::with_http_client(providers, DemoBridge, OfflineDiscovery);
	let session = client.authorize("google").await?;

	println!("Runtime granted a session: {session}.");

	let profile = client.action_with_token("https://www.googleapis.com/oauth2/v3/userinfo").await?;

	println!("Token-bearing action answered: {profile}.");

	client.signout("google").await?;
	println!("Signed out of google.");

	match client.authorize("gitlab").await {
		Ok(_) => println!("Unexpected success for an unconfigured provider."),
		Err(e) => println!("Unconfigured providers fail before any dispatch: {e}."),
	}

	Ok(())
}

/// Host bridge double that answers every operation with a canned payload.
struct DemoBridge;
impl HostBridge for DemoBridge {
	fn call(&self, op: BridgeOp, payload: Value) -> BridgeFuture<'_> {
		Box::pin(async move {
			match op {
				BridgeOp::Authorize => Ok(json!({
					"provider": payload["config"]["name"],
					"granted": true
				})),
				BridgeOp::Signout => Ok(Value::Null),
				BridgeOp::ActionWithToken => Ok(json!({
					"endpoint": payload["endpoint"],
					"status": 200,
					"body": "{\"sub\":\"demo-user\"}"
				})),
			}
		})
	}
}

/// Discovery stand-in for a demo that stays offline.
struct OfflineDiscovery;
impl DiscoveryHttpClient for OfflineDiscovery {
	fn get(&self, _endpoint: &Url) -> DiscoveryFuture<'_> {
		Box::pin(async { Ok("{}".to_owned()) })
	}
}
