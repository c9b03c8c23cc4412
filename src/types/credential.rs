use std::fmt;

/// An API key for the forecast provider. `Debug` never prints the secret.
#[derive(Clone, PartialEq, Eq)]
pub struct ApiKey(String);

impl ApiKey {
    pub fn new(key: impl Into<String>) -> Self {
        Self(key.into())
    }

    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for ApiKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("ApiKey(***)")
    }
}

/// The two equivalent keys. The secondary is only used once the primary's quota is exhausted.
#[derive(Debug, Clone)]
pub struct Credentials {
    pub primary: ApiKey,
    pub secondary: ApiKey,
}

impl Credentials {
    pub fn new(primary: ApiKey, secondary: ApiKey) -> Self {
        Self { primary, secondary }
    }

    pub fn get(&self, active: ActiveCredential) -> &ApiKey {
        match active {
            ActiveCredential::Primary => &self.primary,
            ActiveCredential::Secondary => &self.secondary,
        }
    }
}

/// Which of the two keys requests are currently signed with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ActiveCredential {
    #[default]
    Primary,
    Secondary,
}

impl fmt::Display for ActiveCredential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ActiveCredential::Primary => f.write_str("primary"),
            ActiveCredential::Secondary => f.write_str("secondary"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_debug_redacts_key() {
        let key = ApiKey::new("super-secret");
        assert_eq!(format!("{:?}", key), "ApiKey(***)");
        assert_eq!(key.expose(), "super-secret");
    }

    #[test]
    fn test_get_active_key() {
        let credentials = Credentials::new(ApiKey::new("one"), ApiKey::new("two"));
        assert_eq!(credentials.get(ActiveCredential::default()).expose(), "one");
        assert_eq!(credentials.get(ActiveCredential::Secondary).expose(), "two");
    }
}
