//! Build information module
//!
//! Contains compile-time constants for build number and timestamp.

use serde::Serialize;

/// Build number, incremented on each recompilation
pub const BUILD_NUMBER: u64 = match option_env!("NT_BUILD_NUMBER") {
    Some(s) => match parse_u64(s) {
        Some(n) => n,
        None => 0,
    },
    None => 0,
};

/// Build timestamp in ISO 8601 format
pub const BUILD_TIMESTAMP: &str = match option_env!("NT_BUILD_TIMESTAMP") {
    Some(s) => s,
    None => "unknown",
};

/// Package version from Cargo.toml
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Package name from Cargo.toml
pub const NAME: &str = env!("CARGO_PKG_NAME");

/// Const function to parse u64 at compile time
const fn parse_u64(s: &str) -> Option<u64> {
    let bytes = s.as_bytes();
    if bytes.is_empty() {
        return None;
    }
    let mut result: u64 = 0;
    let mut i = 0;
    while i < bytes.len() {
        let b = bytes[i];
        if b < b'0' || b > b'9' {
            return None;
        }
        result = result * 10 + (b - b'0') as u64;
        i += 1;
    }
    Some(result)
}

/// Build information structure for serialization
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BuildInfo {
    pub name: &'static str,
    pub version: &'static str,
    pub build_number: u64,
    pub build_timestamp: &'static str,
}

impl BuildInfo {
    /// Get the current build info
    pub fn current() -> Self {
        Self {
            name: NAME,
            version: VERSION,
            build_number: BUILD_NUMBER,
            build_timestamp: BUILD_TIMESTAMP,
        }
    }
}

impl std::fmt::Display for BuildInfo {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {} (build {}, {})", self.name, self.version, self.build_number, self.build_timestamp)
    }
}

/// Print the startup banner to stderr
pub fn print_startup_banner() {
    eprintln!("===============================================");
    eprintln!("  Nutrition & Activity Tracker");
    eprintln!("  {}", BuildInfo::current());
    eprintln!("===============================================");
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_u64() {
        assert_eq!(parse_u64("42"), Some(42));
        assert_eq!(parse_u64("4x"), None);
        assert_eq!(parse_u64(""), None);
    }

    #[test]
    fn test_display() {
        let info = BuildInfo {
            name: "nutrition-tracker",
            version: "1.0.0",
            build_number: 7,
            build_timestamp: "2024-01-15T08:00:00Z",
        };
        assert_eq!(info.to_string(), "nutrition-tracker 1.0.0 (build 7, 2024-01-15T08:00:00Z)");
        assert_eq!(BuildInfo::current().name, "nutrition-tracker");
    }
}
