//! Session credential holder.

use mailroom_api::Token;

use crate::error::{Error, Result};

/// Holds the bearer token of the authenticated user, if any.
///
/// A session is passed explicitly into every gateway call, so tests can use
/// their own session without any process-wide state. No expiry is tracked:
/// the gateway's per-request outcome decides whether the token is valid.
#[derive(Debug, Clone, Default)]
pub struct Session {
    token: Option<Token>,
}

impl Session {
    /// Creates an unauthenticated session.
    #[must_use]
    pub const fn new() -> Self {
        Self { token: None }
    }

    /// Creates a session holding `token`.
    #[must_use]
    pub const fn with_token(token: Token) -> Self {
        Self { token: Some(token) }
    }

    /// Stores the token, replacing any previous one.
    pub fn set(&mut self, token: Token) {
        self.token = Some(token);
    }

    /// Returns the token, if present.
    #[must_use]
    pub const fn get(&self) -> Option<&Token> {
        self.token.as_ref()
    }

    /// Removes the token and returns it.
    pub fn clear(&mut self) -> Option<Token> {
        self.token.take()
    }

    /// Returns true if a token is present.
    #[must_use]
    pub const fn is_authenticated(&self) -> bool {
        self.token.is_some()
    }

    /// Returns the token or an authentication error.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Authentication`] when no token is held.
    pub fn require(&self) -> Result<&Token> {
        self.token
            .as_ref()
            .filter(|token| !token.is_blank())
            .ok_or_else(|| Error::Authentication("not logged in".to_string()))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_set_get_clear() {
        let mut session = Session::new();
        assert!(session.get().is_none());
        assert!(!session.is_authenticated());

        session.set(Token::new("abc"));
        assert_eq!(session.get().unwrap().as_str(), "abc");

        let cleared = session.clear();
        assert_eq!(cleared.unwrap().as_str(), "abc");
        assert!(session.get().is_none());
    }

    #[test]
    fn test_require_without_token() {
        let err = Session::new().require().unwrap_err();
        assert!(err.is_authentication());
    }

    #[test]
    fn test_require_rejects_blank_token() {
        let session = Session::with_token(Token::new(""));
        assert!(session.require().unwrap_err().is_authentication());
    }

    #[test]
    fn test_set_replaces_token() {
        let mut session = Session::with_token(Token::new("old"));
        session.set(Token::new("new"));
        assert_eq!(session.require().unwrap().as_str(), "new");
    }
}
