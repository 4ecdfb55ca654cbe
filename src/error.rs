//! Binding-level error types shared across resolution, bridge, and discovery seams.

// self
use crate::_prelude::*;

/// Crate-wide result type alias returning [`Error`] by default.
pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Canonical error exposed by public operations.
///
/// Every failure surfaces through the operation's returned future, which resolves exactly once.
/// The two locally-detected variants resolve before any bridge or network dispatch; the two
/// pass-through variants carry whatever the external collaborator reported, untouched. Nothing
/// is retried, logged, or downgraded to a fallback.
#[derive(Debug, ThisError)]
pub enum Error {
	/// Named provider absent from the provider collection.
	#[error("Could not find a configuration for a provider called: {name}")]
	ProviderNotFound {
		/// Provider name requested by the caller.
		name: String,
	},
	/// Resolved configuration declares no discovery endpoint; raised only by discovery calls.
	#[error("No discovery endpoint configured for provider")]
	MissingDiscoveryEndpoint,
	/// Failure reported by the host bridge, passed through verbatim.
	#[error(transparent)]
	Bridge(#[from] crate::bridge::BridgeError),
	/// Failure reported by the discovery HTTP layer, passed through verbatim.
	#[error(transparent)]
	Discovery(#[from] crate::discovery::DiscoveryError),
}

#[cfg(test)]
mod tests {
	// self
	use super::*;
	use crate::bridge::BridgeError;

	#[test]
	fn local_error_messages_are_fixed() {
		let not_found = Error::ProviderNotFound { name: "github".into() };

		assert_eq!(
			not_found.to_string(),
			"Could not find a configuration for a provider called: github",
		);
		assert_eq!(
			Error::MissingDiscoveryEndpoint.to_string(),
			"No discovery endpoint configured for provider",
		);
	}

	#[test]
	fn bridge_error_passes_through_transparently() {
		let bridge_error = BridgeError::new("User cancelled the authorization flow");
		let error: Error = bridge_error.into();

		assert!(matches!(error, Error::Bridge(_)));
		assert_eq!(error.to_string(), "User cancelled the authorization flow");
	}
}
