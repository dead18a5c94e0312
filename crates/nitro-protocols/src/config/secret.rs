use std::fmt;

/// Signing key read from settings. Never printed.
#[derive(Clone, PartialEq, Eq)]
pub struct SecretKey(String);

impl SecretKey {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into().trim().to_string())
    }

    pub fn expose(&self) -> &str {
        &self.0
    }

    /// 32 bytes of hex, with or without a `0x` prefix.
    pub fn is_well_formed(&self) -> bool {
        let hex = self.0.strip_prefix("0x").unwrap_or(&self.0);
        hex.len() == 64 && hex.chars().all(|c| c.is_ascii_hexdigit())
    }
}

impl fmt::Debug for SecretKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("SecretKey(<redacted>)")
    }
}
