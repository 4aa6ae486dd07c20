//! Parser configuration.
//!
//! Bounds recursion depth and string size, and selects whether `[]` and `{}`
//! are accepted. The original strict policy rejected empty containers; the
//! default here follows standard JSON and accepts them.

/// Limits applied while parsing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Limits {
    /// Maximum nesting depth for arrays/objects
    pub max_nesting_depth: u64,
    /// Maximum decoded string length in bytes
    pub max_string_length: u64,
    /// Whether `[]` and `{}` parse successfully
    pub allow_empty_containers: bool,
}

impl Limits {
    /// Standard JSON behavior with generous bounds.
    pub const fn standard() -> Self {
        Self {
            max_nesting_depth: 128,
            max_string_length: 16 * 1024 * 1024,
            allow_empty_containers: true,
        }
    }

    /// Tight bounds; empty arrays and objects are malformed.
    pub const fn strict() -> Self {
        Self {
            max_nesting_depth: 64,
            max_string_length: 1024 * 1024,
            allow_empty_containers: false,
        }
    }
}

impl Default for Limits {
    fn default() -> Self {
        Self::standard()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_standard_limits() {
        let limits = Limits::standard();
        assert_eq!(limits.max_nesting_depth, 128);
        assert_eq!(limits.max_string_length, 16 * 1024 * 1024);
        assert!(limits.allow_empty_containers);
        assert_eq!(Limits::default(), limits);
    }

    #[test]
    fn test_strict_limits() {
        let limits = Limits::strict();
        assert!(!limits.allow_empty_containers);
        assert!(limits.max_nesting_depth < Limits::standard().max_nesting_depth);
        assert!(limits.max_string_length < Limits::standard().max_string_length);
    }
}
