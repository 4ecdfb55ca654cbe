//! Provider configurations, the ordered provider registry, and name resolution.

// std
use std::{borrow::Borrow, ops::Deref, str::FromStr};
// self
use crate::_prelude::*;

const PROVIDER_NAME_MAX_LEN: usize = 128;

/// Validated provider identifier used as the registry lookup key.
///
/// Names compare with exact, case-sensitive equality. Uniqueness inside a registry is a
/// convention, not an invariant; resolution returns the first match.
#[derive(Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ProviderName(String);
impl ProviderName {
	/// Creates a new provider name after validation.
	pub fn new(value: impl AsRef<str>) -> Result<Self, ProviderNameError> {
		let view = value.as_ref();

		validate_name(view)?;

		Ok(Self(view.to_owned()))
	}
}
impl Deref for ProviderName {
	type Target = str;

	fn deref(&self) -> &Self::Target {
		&self.0
	}
}
impl AsRef<str> for ProviderName {
	fn as_ref(&self) -> &str {
		&self.0
	}
}
impl Borrow<str> for ProviderName {
	fn borrow(&self) -> &str {
		&self.0
	}
}
impl From<ProviderName> for String {
	fn from(value: ProviderName) -> Self {
		value.0
	}
}
impl TryFrom<String> for ProviderName {
	type Error = ProviderNameError;

	fn try_from(value: String) -> Result<Self, Self::Error> {
		validate_name(&value)?;

		Ok(Self(value))
	}
}
impl FromStr for ProviderName {
	type Err = ProviderNameError;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		Self::new(s)
	}
}
impl Debug for ProviderName {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		write!(f, "Provider({})", self.0)
	}
}
impl Display for ProviderName {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(&self.0)
	}
}

/// Error returned when provider name validation fails.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, ThisError)]
pub enum ProviderNameError {
	/// The name was empty.
	#[error("Provider name cannot be empty.")]
	Empty,
	/// The name contains whitespace characters.
	#[error("Provider name contains whitespace.")]
	ContainsWhitespace,
	/// The name exceeded the allowed character count.
	#[error("Provider name exceeds {max} characters.")]
	TooLong {
		/// Maximum permitted character count.
		max: usize,
	},
}

fn validate_name(view: &str) -> Result<(), ProviderNameError> {
	if view.is_empty() {
		return Err(ProviderNameError::Empty);
	}
	if view.chars().any(char::is_whitespace) {
		return Err(ProviderNameError::ContainsWhitespace);
	}
	if view.len() > PROVIDER_NAME_MAX_LEN {
		return Err(ProviderNameError::TooLong { max: PROVIDER_NAME_MAX_LEN });
	}

	Ok(())
}

/// One OAuth provider's settings as loaded from the host application's configuration.
///
/// Only the `name` and `discovery_endpoint` fields are interpreted by this crate. Everything
/// else a provider declares (client identifiers, scopes, endpoints the host runtime
/// understands) is carried opaquely in `extra` and serialized through to the bridge
/// unmodified.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ProviderConfig {
	/// Registry lookup key.
	pub name: ProviderName,
	/// Provider-metadata URL; its presence is the precondition for discovery calls.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub discovery_endpoint: Option<Url>,
	/// Remaining provider fields, passed through to the host bridge as-is.
	#[serde(flatten)]
	pub extra: Map<String, Value>,
}
impl ProviderConfig {
	/// Creates a configuration with the given name and no further fields.
	pub fn new(name: ProviderName) -> Self {
		Self { name, discovery_endpoint: None, extra: Map::new() }
	}

	/// Sets or replaces the discovery endpoint.
	pub fn with_discovery_endpoint(mut self, endpoint: Url) -> Self {
		self.discovery_endpoint = Some(endpoint);

		self
	}

	/// Adds an opaque provider field forwarded to the host bridge.
	pub fn with_extra(mut self, key: impl Into<String>, value: Value) -> Self {
		self.extra.insert(key.into(), value);

		self
	}
}

/// Caller-supplied provider identification: a name to resolve, or a ready configuration.
///
/// The two-shape "name or object" parameter of the binding API, lifted into a tagged union so
/// resolution happens exactly once instead of scattering runtime type checks across call
/// sites.
#[derive(Clone, Debug, PartialEq)]
pub enum ProviderSelector {
	/// Resolve this name against the registry.
	Named(String),
	/// Use this configuration as-is; no lookup, no shape validation.
	Configured(ProviderConfig),
}
impl From<&str> for ProviderSelector {
	fn from(name: &str) -> Self {
		Self::Named(name.to_owned())
	}
}
impl From<String> for ProviderSelector {
	fn from(name: String) -> Self {
		Self::Named(name)
	}
}
impl From<&ProviderName> for ProviderSelector {
	fn from(name: &ProviderName) -> Self {
		Self::Named(name.as_ref().to_owned())
	}
}
impl From<ProviderConfig> for ProviderSelector {
	fn from(config: ProviderConfig) -> Self {
		Self::Configured(config)
	}
}

/// Ordered, read-only collection of provider configurations.
///
/// Populated once from external configuration and injected into the client; this crate never
/// mutates it. Deserializes transparently from the JSON array the host app ships.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProviderRegistry(Vec<ProviderConfig>);
impl ProviderRegistry {
	/// Creates a registry preserving the iteration order of `providers`.
	pub fn new(providers: impl IntoIterator<Item = ProviderConfig>) -> Self {
		Self(providers.into_iter().collect())
	}

	/// Returns the first configuration whose name equals `name`, comparing case-sensitively.
	pub fn get(&self, name: &str) -> Option<&ProviderConfig> {
		self.0.iter().find(|provider| provider.name.as_ref() == name)
	}

	/// Normalizes a selector into a concrete configuration.
	///
	/// Named selectors resolve to the first matching registry entry or fail with
	/// [`Error::ProviderNotFound`]; configured selectors pass through unchanged.
	pub fn resolve(&self, selector: ProviderSelector) -> Result<ProviderConfig> {
		match selector {
			ProviderSelector::Named(name) =>
				self.get(&name).cloned().ok_or(Error::ProviderNotFound { name }),
			ProviderSelector::Configured(config) => Ok(config),
		}
	}

	/// Iterates over the configured providers in registry order.
	pub fn iter(&self) -> impl Iterator<Item = &ProviderConfig> {
		self.0.iter()
	}

	/// Returns the number of configured providers.
	pub fn len(&self) -> usize {
		self.0.len()
	}

	/// Checks whether no providers are configured.
	pub fn is_empty(&self) -> bool {
		self.0.is_empty()
	}
}
impl FromIterator<ProviderConfig> for ProviderRegistry {
	fn from_iter<I>(iter: I) -> Self
	where
		I: IntoIterator<Item = ProviderConfig>,
	{
		Self::new(iter)
	}
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	fn name(value: &str) -> ProviderName {
		ProviderName::new(value).expect("Provider name fixture should be valid.")
	}

	#[test]
	fn provider_names_validate() {
		assert_eq!(ProviderName::new(""), Err(ProviderNameError::Empty));
		assert_eq!(ProviderName::new("my provider"), Err(ProviderNameError::ContainsWhitespace));
		assert_eq!(
			ProviderName::new("a".repeat(PROVIDER_NAME_MAX_LEN + 1)),
			Err(ProviderNameError::TooLong { max: PROVIDER_NAME_MAX_LEN }),
		);

		let exact = "a".repeat(PROVIDER_NAME_MAX_LEN);

		ProviderName::new(&exact).expect("Exact-length name should be accepted.");
	}

	#[test]
	fn serde_enforces_name_validation() {
		let parsed: ProviderName =
			serde_json::from_str("\"google\"").expect("Valid name should deserialize.");

		assert_eq!(parsed.as_ref(), "google");
		assert!(serde_json::from_str::<ProviderName>("\"with space\"").is_err());
	}

	#[test]
	fn resolution_returns_first_match() {
		let first = ProviderConfig::new(name("google"))
			.with_extra("client_id", Value::String("first".into()));
		let duplicate = ProviderConfig::new(name("google"))
			.with_extra("client_id", Value::String("second".into()));
		let registry = ProviderRegistry::new([first.clone(), duplicate]);
		let resolved = registry
			.resolve("google".into())
			.expect("Named resolution should succeed for a configured provider.");

		assert_eq!(resolved, first);
	}

	#[test]
	fn resolution_is_case_sensitive() {
		let registry = ProviderRegistry::new([ProviderConfig::new(name("google"))]);
		let err = registry
			.resolve("Google".into())
			.expect_err("Lookup must not match across letter case.");

		assert_eq!(err.to_string(), "Could not find a configuration for a provider called: Google");
	}

	#[test]
	fn configured_selector_is_identity() {
		let registry = ProviderRegistry::default();
		let config = ProviderConfig::new(name("adhoc"))
			.with_extra("authorization_endpoint", Value::String("https://example.com/auth".into()));
		let resolved = registry
			.resolve(config.clone().into())
			.expect("Configured selectors must bypass the registry.");

		assert_eq!(resolved, config);
	}

	#[test]
	fn config_serialization_preserves_opaque_fields_and_omits_absent_endpoint() {
		let config = ProviderConfig::new(name("github"))
			.with_extra("client_id", Value::String("abc123".into()))
			.with_extra("scopes", serde_json::json!(["user", "repo"]));
		let value = serde_json::to_value(&config).expect("Config should serialize.");

		assert_eq!(value["name"], "github");
		assert_eq!(value["client_id"], "abc123");
		assert_eq!(value["scopes"], serde_json::json!(["user", "repo"]));
		assert!(value.get("discovery_endpoint").is_none());
	}

	#[test]
	fn registry_deserializes_from_config_array() {
		let payload = r#"[
			{"name": "google", "discovery_endpoint": "https://accounts.google.com/.well-known/openid-configuration", "client_id": "g-123"},
			{"name": "github", "client_id": "gh-456"}
		]"#;
		let registry: ProviderRegistry =
			serde_json::from_str(payload).expect("Registry should deserialize from a JSON array.");

		assert_eq!(registry.len(), 2);

		let google = registry.get("google").expect("google should be configured.");

		assert_eq!(
			google.discovery_endpoint.as_ref().map(Url::as_str),
			Some("https://accounts.google.com/.well-known/openid-configuration"),
		);
		assert_eq!(google.extra.get("client_id"), Some(&Value::String("g-123".into())));
		assert!(registry.get("github").expect("github should be configured.").discovery_endpoint.is_none());
	}
}
