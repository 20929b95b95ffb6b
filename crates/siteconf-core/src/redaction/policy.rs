use serde::{Deserialize, Serialize};

/// Which keys and values count as sensitive
///
/// Key matching is case-insensitive and whole-word: `token` matches
/// `"token":` and `Token =` but not `tokenizer:`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RedactionPolicy {
    /// Keys whose values are always redacted (replaces the defaults when set)
    pub sensitive_keys: Vec<String>,
    /// Keys added on top of `sensitive_keys`
    pub extra_keys: Vec<String>,
    /// Regexes for secret values that are redacted wherever they appear
    ///
    /// When a pattern has a `secret` capture group only that group is
    /// replaced, otherwise the whole match is. Redacted output may still
    /// match a pattern, but only where the replaced part is exactly the
    /// placeholder; any other match fails verification.
    pub value_patterns: Vec<String>,
}

impl Default for RedactionPolicy {
    fn default() -> Self {
        Self {
            sensitive_keys: default_sensitive_keys(),
            extra_keys: Vec::new(),
            value_patterns: default_value_patterns(),
        }
    }
}

impl RedactionPolicy {
    /// All sensitive keys, defaults and extras, without duplicates
    pub fn keys(&self) -> Vec<String> {
        let mut keys: Vec<String> = Vec::new();
        for key in self.sensitive_keys.iter().chain(self.extra_keys.iter()) {
            let key = key.trim();
            if !key.is_empty() && !keys.iter().any(|k| k.eq_ignore_ascii_case(key)) {
                keys.push(key.to_string());
            }
        }
        keys
    }

    pub fn with_extra_key(mut self, key: impl Into<String>) -> Self {
        self.extra_keys.push(key.into());
        self
    }

    pub fn with_value_pattern(mut self, pattern: impl Into<String>) -> Self {
        self.value_patterns.push(pattern.into());
        self
    }
}

fn default_sensitive_keys() -> Vec<String> {
    [
        "password",
        "passwd",
        "token",
        "secret",
        "apiKey",
        "api_key",
        "clientSecret",
        "client_secret",
        "accessToken",
        "access_token",
        "refreshToken",
        "refresh_token",
        "privateKey",
        "private_key",
        "secretKey",
        "secret_key",
        "accessKeySecret",
        "credentials",
        "sessionKey",
        "webhookSecret",
    ]
    .iter()
    .map(|s| s.to_string())
    .collect()
}

fn default_value_patterns() -> Vec<String> {
    // user:password@host inside URLs
    vec![r"://[^/\s:@]+:(?P<secret>[^/\s@]+)@".to_string()]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_cover_common_secret_names() {
        let keys = RedactionPolicy::default().keys();
        for expected in ["password", "token", "secret", "apiKey", "clientSecret", "accessToken"] {
            assert!(keys.iter().any(|k| k == expected), "missing {}", expected);
        }
    }

    #[test]
    fn test_extra_keys_extend_and_dedupe() {
        let policy = RedactionPolicy::default()
            .with_extra_key("licenseKey")
            .with_extra_key("TOKEN");
        let keys = policy.keys();
        assert!(keys.iter().any(|k| k == "licenseKey"));
        assert_eq!(keys.iter().filter(|k| k.eq_ignore_ascii_case("token")).count(), 1);
    }

    #[test]
    fn test_deserialize_partial_yaml_keeps_defaults() {
        let policy: RedactionPolicy = serde_yaml::from_str("extra_keys: [licenseKey]").unwrap();
        assert_eq!(policy.sensitive_keys, RedactionPolicy::default().sensitive_keys);
        assert_eq!(policy.extra_keys, vec!["licenseKey".to_string()]);
    }
}
