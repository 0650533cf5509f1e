//! Print route addressing and credentials
//!
//! The print route is a server-rendered, chrome-free view of one
//! document, keyed by document identifier. Authentication happens with a
//! session cookie when cookie injection works, or with an identity query
//! parameter as the fallback.

use serde::{Deserialize, Serialize};

/// A session cookie to inject before navigating
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionCookie {
    pub name: String,
    pub value: String,
}

/// Credential material for the print route
///
/// Either part may be absent; the exporter prefers the cookie and falls
/// back to the identity token when cookie injection fails or no cookie
/// was supplied.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Credential {
    #[serde(default)]
    pub session_cookie: Option<SessionCookie>,
    #[serde(default)]
    pub identity_token: Option<String>,
}

impl Credential {
    pub fn from_token(token: impl Into<String>) -> Self {
        Self {
            session_cookie: None,
            identity_token: Some(token.into()),
        }
    }

    pub fn from_cookie(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            session_cookie: Some(SessionCookie {
                name: name.into(),
                value: value.into(),
            }),
            identity_token: None,
        }
    }
}

/// Location of the print route
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PrintRoute {
    /// Origin of the application serving the print view
    pub base_url: String,
}

impl PrintRoute {
    pub fn new(base_url: impl Into<String>) -> Self {
        let mut base_url = base_url.into();
        while base_url.ends_with('/') {
            base_url.pop();
        }
        Self { base_url }
    }

    /// URL of the print view for a document, optionally carrying the
    /// identity token as a query parameter
    pub fn url_for(&self, document_id: &str, identity_token: Option<&str>) -> String {
        let mut url = format!(
            "{}/print/{}",
            self.base_url,
            urlencoding::encode(document_id)
        );
        if let Some(token) = identity_token {
            url.push_str("?identity=");
            url.push_str(&urlencoding::encode(token));
        }
        url
    }
}
