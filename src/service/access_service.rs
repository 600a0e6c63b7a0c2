//! Configuration-backed endpoints: maps key and shared-password check.

use subtle::ConstantTimeEq;

use crate::config::{GatewayConfig, Secret};
use crate::error::GatewayError;

/// Answers the maps-key and password-check endpoints.
#[derive(Debug, Clone)]
pub struct AccessService {
    maps_api_key: Option<Secret>,
    responses_password: Option<Secret>,
}

impl AccessService {
    /// Creates a service from explicit secrets.
    #[must_use]
    pub fn new(maps_api_key: Option<Secret>, responses_password: Option<Secret>) -> Self {
        Self {
            maps_api_key,
            responses_password,
        }
    }

    /// Creates a service from the loaded configuration.
    #[must_use]
    pub fn from_config(config: &GatewayConfig) -> Self {
        Self::new(
            config.maps_api_key.clone(),
            config.responses_password.clone(),
        )
    }

    /// Returns the configured maps API key, if any.
    #[must_use]
    pub fn maps_key(&self) -> Option<&str> {
        self.maps_api_key.as_ref().map(Secret::expose)
    }

    /// Checks a password against the configured secret in constant time.
    ///
    /// An empty password is compared like any other value.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError::NotConfigured`] when no password is set and
    /// [`GatewayError::Unauthorized`] on mismatch.
    pub fn check_password(&self, password: &str) -> Result<(), GatewayError> {
        let Some(expected) = &self.responses_password else {
            return Err(GatewayError::NotConfigured("responses password"));
        };

        if bool::from(password.as_bytes().ct_eq(expected.expose().as_bytes())) {
            Ok(())
        } else {
            tracing::warn!("password check failed");
            Err(GatewayError::Unauthorized)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn with_password(pw: &str) -> AccessService {
        AccessService::new(None, Some(Secret::new(pw)))
    }

    #[test]
    fn correct_password_passes() {
        assert!(with_password("hunter2").check_password("hunter2").is_ok());
    }

    #[test]
    fn wrong_password_is_unauthorized() {
        let service = with_password("hunter2");
        for guess in ["hunter", "hunter22", "HUNTER2", ""] {
            assert!(matches!(
                service.check_password(guess),
                Err(GatewayError::Unauthorized)
            ));
        }
    }

    #[test]
    fn unconfigured_password_always_fails_with_config_error() {
        let service = AccessService::new(None, None);
        for guess in ["", "anything"] {
            assert!(matches!(
                service.check_password(guess),
                Err(GatewayError::NotConfigured(_))
            ));
        }
    }

    #[test]
    fn maps_key_passthrough() {
        let service = AccessService::new(Some(Secret::new("abc")), None);
        assert_eq!(service.maps_key(), Some("abc"));
        assert_eq!(AccessService::new(None, None).maps_key(), None);
    }
}
