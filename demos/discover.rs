//! Fetches and parses a live OpenID Connect discovery document.
//!
//! Discovery is the one binding operation that bypasses the host bridge, so this demo needs no
//! runtime at all: an inert bridge satisfies the type and the default reqwest transport does
//! the work.

// crates.io
use color_eyre::Result;
// self
use oauth_bridge::{
	bridge::{BridgeFuture, BridgeOp, HostBridge},
	client::OauthClient,
	provider::{ProviderConfig, ProviderName, ProviderRegistry},
	serde_json::Value,
	url::Url,
};

#[tokio::main]
async fn main() -> Result<()> {
	color_eyre::install()?;

	let google = ProviderConfig::new(ProviderName::new("google")?).with_discovery_endpoint(
		Url::parse("https://accounts.google.com/.well-known/openid-configuration")?,
	);
	let client = OauthClient::new(ProviderRegistry::new([google]), NoBridge);
	let document = client.discover_document("google").await?;

	println!("Issuer: {:?}.", document.issuer.as_ref().map(Url::as_str));
	println!(
		"Authorization endpoint: {:?}.",
		document.authorization_endpoint.as_ref().map(Url::as_str)
	);
	println!("Token endpoint: {:?}.", document.token_endpoint.as_ref().map(Url::as_str));
	println!("Extra metadata fields carried through: {}.", document.extra.len());

	match client.discover("github").await {
		Ok(_) => println!("Unexpected success for an unconfigured provider."),
		Err(e) => println!("Unconfigured providers fail before any request: {e}."),
	}

	Ok(())
}

/// This demo never crosses the bridge seam.
struct NoBridge;
impl HostBridge for NoBridge {
	fn call(&self, op: BridgeOp, _payload: Value) -> BridgeFuture<'_> {
		panic!("Unexpected bridge dispatch: {op}.");
	}
}
