/// Bearer credential
use std::fmt;

/// Opaque bearer token authorizing API calls.
///
/// The contents are never inspected. `Debug` redacts the value so tokens do not
/// end up in logs.
#[derive(Clone, PartialEq, Eq)]
pub struct Credential(String);

impl Credential {
    /// Wrap a raw token string
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    /// The raw token, for the `Authorization` header
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consume into the raw token
    pub fn into_inner(self) -> String {
        self.0
    }
}

impl fmt::Debug for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Credential(<redacted>)")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn debug_output_hides_token() {
        let credential = Credential::new("secret-token");
        let debug = format!("{:?}", credential);
        assert!(!debug.contains("secret-token"));
        assert_eq!(credential.as_str(), "secret-token");
    }
}
