use crate::{SignInProvider, Uid};

/// Verified identity attached to a request after token validation
#[derive(Debug, Clone, PartialEq)]
pub struct AuthContext {
    pub uid: Uid,
    pub email: Option<String>,
    pub provider: Option<SignInProvider>,
}

impl AuthContext {
    pub fn new(uid: Uid) -> Self {
        Self {
            uid,
            email: None,
            provider: None,
        }
    }
}

/// Everything the hosting environment knows about the caller.
/// `auth` is `None` when no verified identity is present.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CallerContext {
    pub auth: Option<AuthContext>,
}

impl CallerContext {
    pub fn anonymous() -> Self {
        Self { auth: None }
    }

    pub fn authenticated(auth: AuthContext) -> Self {
        Self { auth: Some(auth) }
    }

    pub fn uid(&self) -> Option<&Uid> {
        self.auth.as_ref().map(|a| &a.uid)
    }
}
