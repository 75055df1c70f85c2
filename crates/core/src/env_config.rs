//! Environment variable parsing with warn-level logging for invalid values.

/// Parse an environment variable with a default fallback.
///
/// - If the variable is not set: returns `default` silently (expected case).
/// - If the variable is set but cannot be parsed: logs a warning and returns `default`.
pub fn env_parse_with_default<T: std::str::FromStr + std::fmt::Display>(
    var: &str,
    default: T,
) -> T {
    match std::env::var(var) {
        Ok(v) => match v.trim().parse() {
            Ok(n) => n,
            Err(_) => {
                tracing::warn!(
                    var,
                    value = %v,
                    default = %default,
                    "invalid env var value, using default"
                );
                default
            },
        },
        Err(_) => default,
    }
}

/// Read a comma-separated list from an environment variable.
///
/// Entries are trimmed and lowercased; empty entries are dropped. An unset
/// variable yields an empty list.
pub fn env_list(var: &str) -> Vec<String> {
    std::env::var(var).map_or_else(|_| Vec::new(), |raw| split_list(&raw))
}

pub(crate) fn split_list(raw: &str) -> Vec<String> {
    raw.split(',').map(str::trim).filter(|s| !s.is_empty()).map(str::to_lowercase).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    // SAFETY (all tests below): every test uses its own variable name, so no
    // other thread reads or writes the same key concurrently.

    #[test]
    fn test_env_parse_valid_value() {
        let var_name = "TEST_RENTSWIPE_ENV_PARSE_VALID";
        unsafe { std::env::set_var(var_name, "42") };
        let result: u32 = env_parse_with_default(var_name, 10);
        assert_eq!(result, 42);
        unsafe { std::env::remove_var(var_name) };
    }

    #[test]
    fn test_env_parse_invalid_value() {
        let var_name = "TEST_RENTSWIPE_ENV_PARSE_INVALID";
        unsafe { std::env::set_var(var_name, "banana") };
        let result: u32 = env_parse_with_default(var_name, 10);
        assert_eq!(result, 10);
        unsafe { std::env::remove_var(var_name) };
    }

    #[test]
    fn test_env_parse_missing_var() {
        let var_name = "TEST_RENTSWIPE_ENV_PARSE_MISSING";
        unsafe { std::env::remove_var(var_name) };
        let result: u32 = env_parse_with_default(var_name, 10);
        assert_eq!(result, 10);
    }

    #[test]
    fn test_env_list_splits_and_normalizes() {
        let var_name = "TEST_RENTSWIPE_ENV_LIST";
        unsafe { std::env::set_var(var_name, " CDN.example.com, ,thumbs.io ") };
        assert_eq!(env_list(var_name), vec!["cdn.example.com", "thumbs.io"]);
        unsafe { std::env::remove_var(var_name) };
    }

    #[test]
    fn test_split_list_empty() {
        assert!(split_list("").is_empty());
        assert!(split_list(" , ,").is_empty());
    }
}
