//! Account gate in front of the drills and the library.
//!
//! The identity provider itself (Google, Facebook, e-mail sign-up) lives
//! outside this crate behind [`AuthProvider`]; [`Account`] only remembers who is
//! signed in.

use crate::error::SolfegeError;
use log::{info, warn};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SignInMethod {
    Google,
    Facebook,
    Email { address: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserIdentity {
    pub uid: String,
    pub email: Option<String>,
}

pub trait AuthProvider {
    fn sign_in(&mut self, method: SignInMethod) -> Result<UserIdentity, SolfegeError>;
    fn sign_out(&mut self) -> Result<(), SolfegeError>;
}

/// Signed-in state on top of an [`AuthProvider`]
#[derive(Debug)]
pub struct Account<P> {
    provider: P,
    user: Option<UserIdentity>,
}

impl<P: AuthProvider> Account<P> {
    pub fn new(provider: P) -> Self {
        Self {
            provider,
            user: None,
        }
    }

    /// Sign in; on failure any previous identity is kept.
    pub fn sign_in(&mut self, method: SignInMethod) -> Result<&UserIdentity, SolfegeError> {
        let user = self.provider.sign_in(method)?;
        info!("Signed in as {}", user.uid);
        Ok(self.user.insert(user))
    }

    /// Forget the identity. A provider error is logged but the account is
    /// signed out regardless.
    pub fn sign_out(&mut self) {
        if let Err(e) = self.provider.sign_out() {
            warn!("Provider sign-out failed: {}", e);
        }
        self.user = None;
    }

    pub fn is_logged_in(&self) -> bool {
        self.user.is_some()
    }

    pub fn user(&self) -> Option<&UserIdentity> {
        self.user.as_ref()
    }

    pub fn user_email(&self) -> Option<&str> {
        self.user.as_ref().and_then(|u| u.email.as_deref())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct FakeProvider {
        refuse: bool,
        fail_sign_out: bool,
        calls: usize,
    }

    impl AuthProvider for FakeProvider {
        fn sign_in(&mut self, method: SignInMethod) -> Result<UserIdentity, SolfegeError> {
            self.calls += 1;
            if self.refuse {
                return Err(SolfegeError::AuthError("cancelled by user".to_string()));
            }
            let email = match method {
                SignInMethod::Email { address } => Some(address),
                SignInMethod::Google => Some("player@gmail.com".to_string()),
                SignInMethod::Facebook => None,
            };
            Ok(UserIdentity {
                uid: format!("uid-{}", self.calls),
                email,
            })
        }

        fn sign_out(&mut self) -> Result<(), SolfegeError> {
            if self.fail_sign_out {
                Err(SolfegeError::AuthError("network down".to_string()))
            } else {
                Ok(())
            }
        }
    }

    #[test]
    fn test_sign_in_and_out() {
        let mut account = Account::new(FakeProvider::default());
        assert!(!account.is_logged_in());

        let user = account
            .sign_in(SignInMethod::Email {
                address: "eleve@example.com".to_string(),
            })
            .unwrap();
        assert_eq!(user.uid, "uid-1");
        assert!(account.is_logged_in());
        assert_eq!(account.user_email(), Some("eleve@example.com"));

        account.sign_out();
        assert!(!account.is_logged_in());
        assert_eq!(account.user(), None);
    }

    #[test]
    fn test_refused_sign_in() {
        let mut account = Account::new(FakeProvider {
            refuse: true,
            ..Default::default()
        });
        let err = account.sign_in(SignInMethod::Google).unwrap_err();
        assert_eq!(err.to_string(), "Authentication failed: cancelled by user");
        assert!(!account.is_logged_in());
    }

    #[test]
    fn test_sign_out_clears_even_on_provider_error() {
        let mut account = Account::new(FakeProvider {
            fail_sign_out: true,
            ..Default::default()
        });
        account.sign_in(SignInMethod::Facebook).unwrap();
        assert_eq!(account.user_email(), None);
        account.sign_out();
        assert!(!account.is_logged_in());
    }
}
