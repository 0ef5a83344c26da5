use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Credentials {
    pub user: String,
    #[serde(default)]
    pub password: String,
}

/// One server of a cluster: its base URL and optional HTTP credentials.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Endpoint {
    address: String,
    #[serde(default, flatten, skip_serializing_if = "Option::is_none")]
    credentials: Option<Credentials>,
}

impl Endpoint {
    pub fn new(address: impl Into<String>) -> Self {
        Self {
            address: address.into(),
            credentials: None,
        }
    }

    pub fn with_credentials(
        address: impl Into<String>,
        user: impl Into<String>,
        password: impl Into<String>,
    ) -> Self {
        Self {
            address: address.into(),
            credentials: Some(Credentials {
                user: user.into(),
                password: password.into(),
            }),
        }
    }

    pub fn address(&self) -> &str {
        &self.address
    }

    /// Absolute URL for `path` on this endpoint.
    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.address, path)
    }

    /// Credentials, if any part of them is set.
    pub fn credentials(&self) -> Option<&Credentials> {
        self.credentials
            .as_ref()
            .filter(|c| !c.user.is_empty() || !c.password.is_empty())
    }

    /// Value of the `Authorization` header for this endpoint.
    pub(crate) fn authorization(&self) -> Option<String> {
        self.credentials().map(|c| {
            let token = STANDARD.encode(format!("{}:{}", c.user, c.password));
            format!("Basic {token}")
        })
    }
}

impl From<&str> for Endpoint {
    fn from(address: &str) -> Self {
        Self::new(address)
    }
}

impl From<String> for Endpoint {
    fn from(address: String) -> Self {
        Self::new(address)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn url_appends_path() {
        let e = Endpoint::new("http://localhost:4200");
        assert_eq!(e.url("/_sql?types"), "http://localhost:4200/_sql?types");
        assert_eq!(e.address(), "http://localhost:4200");
    }

    #[test]
    fn no_credentials_no_authorization() {
        assert!(Endpoint::new("a").authorization().is_none());
        assert!(Endpoint::with_credentials("a", "", "").authorization().is_none());
    }

    #[test]
    fn basic_authorization() {
        let e = Endpoint::with_credentials("a", "crate", "secret");
        assert_eq!(e.authorization().unwrap(), "Basic Y3JhdGU6c2VjcmV0");
        assert_eq!(e.credentials().unwrap().user, "crate");
    }

    #[test]
    fn structural_equality() {
        assert_eq!(Endpoint::new("a"), Endpoint::from("a"));
        assert_ne!(Endpoint::new("a"), Endpoint::new("b"));
        assert_ne!(
            Endpoint::with_credentials("a", "u", "p"),
            Endpoint::with_credentials("a", "u", "q")
        );
    }

    #[test]
    fn deserializes_with_optional_credentials() {
        let plain: Endpoint = serde_json::from_str(r#"{"address":"http://a:4200"}"#).unwrap();
        assert_eq!(plain, Endpoint::new("http://a:4200"));

        let auth: Endpoint =
            serde_json::from_str(r#"{"address":"http://a:4200","user":"u","password":"p"}"#)
                .unwrap();
        assert_eq!(auth, Endpoint::with_credentials("http://a:4200", "u", "p"));
    }
}
