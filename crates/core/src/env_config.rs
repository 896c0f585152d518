//! Environment variable parsing with warn-level logging for invalid values.

/// Parse an environment variable with a default fallback.
///
/// - Unset: returns `default` silently.
/// - Set but unparseable: logs a warning and returns `default`.
pub fn env_parse_with_default<T: std::str::FromStr + std::fmt::Display>(
    var: &str,
    default: T,
) -> T {
    match std::env::var(var) {
        Ok(v) => match v.parse() {
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

#[cfg(test)]
mod tests {
    use super::*;
    use crate::MergeMode;

    // Each test owns a unique variable name, so concurrent mutation is confined.
    fn set(var: &str, value: &str) {
        unsafe { std::env::set_var(var, value) };
    }

    fn unset(var: &str) {
        unsafe { std::env::remove_var(var) };
    }

    #[test]
    fn test_env_parse_valid_value() {
        let var_name = "SPOTT_TEST_ENV_PARSE_VALID_41871";
        set(var_name, "250");
        let result: usize = env_parse_with_default(var_name, 1000);
        assert_eq!(result, 250);
        unset(var_name);
    }

    #[test]
    fn test_env_parse_invalid_value() {
        let var_name = "SPOTT_TEST_ENV_PARSE_INVALID_41872";
        set(var_name, "lots");
        let result: usize = env_parse_with_default(var_name, 1000);
        assert_eq!(result, 1000);
        unset(var_name);
    }

    #[test]
    fn test_env_parse_missing_var() {
        let var_name = "SPOTT_TEST_ENV_PARSE_MISSING_41873";
        unset(var_name);
        let result: f64 = env_parse_with_default(var_name, 0.0001);
        assert!((result - 0.0001).abs() < f64::EPSILON);
    }

    #[test]
    fn test_env_parse_merge_mode() {
        let var_name = "SPOTT_TEST_ENV_PARSE_MODE_41874";
        set(var_name, "best_effort");
        let result = env_parse_with_default(var_name, MergeMode::Atomic);
        assert_eq!(result, MergeMode::BestEffort);
        unset(var_name);
    }
}
