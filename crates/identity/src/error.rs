use thiserror::Error;

#[derive(Debug, Error)]
pub enum IdentityError {
    #[error("Invalid or expired state")]
    InvalidState,

    #[error("{0}")]
    Exchange(String),

    #[error("{0}")]
    Upstream(String),

    #[error("Timeout: {0}")]
    Timeout(String),

    #[error("Invalid configuration: {0}")]
    Config(String),
}

impl IdentityError {
    /// True for any failure to redeem the login: bad state, rejected code or a stalled token endpoint.
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            IdentityError::InvalidState | IdentityError::Exchange(_) | IdentityError::Timeout(_)
        )
    }
}

pub type IdentityResult<T> = Result<T, IdentityError>;

#[cfg(test)]
mod tests {
    use super::IdentityError;

    #[test]
    fn failed_code_redemption_is_a_client_error() {
        assert!(IdentityError::InvalidState.is_client_error());
        assert!(IdentityError::Exchange("invalid_grant".into()).is_client_error());
        assert!(!IdentityError::Upstream("403 Forbidden".into()).is_client_error());
        assert!(IdentityError::Timeout("token endpoint".into()).is_client_error());
        assert!(!IdentityError::Config("redirectURL".into()).is_client_error());
    }

    #[test]
    fn upstream_error_displays_provider_text_verbatim() {
        let err = IdentityError::Upstream("unexpected response status: 503 Service Unavailable".into());
        assert_eq!(
            err.to_string(),
            "unexpected response status: 503 Service Unavailable"
        );
    }
}
