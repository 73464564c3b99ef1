use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("{0} must be set")]
    Missing(&'static str),
    #[error("{name} has an invalid value: {value}")]
    Invalid { name: &'static str, value: String },
}

/// Reads an optional numeric variable, falling back to `default` when unset.
pub fn parse_or<T: std::str::FromStr>(
    name: &'static str,
    raw: Option<String>,
    default: T,
) -> Result<T, ConfigError> {
    match raw {
        None => Ok(default),
        Some(value) => value
            .trim()
            .parse()
            .map_err(|_| ConfigError::Invalid { name, value }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_use_default_when_unset() {
        assert_eq!(parse_or("X", None, 5u32).unwrap(), 5);
    }

    #[test]
    fn should_parse_trimmed_value() {
        assert_eq!(parse_or("X", Some(" 12 ".to_string()), 5u32).unwrap(), 12);
    }

    #[test]
    fn should_reject_non_numeric_value() {
        let error = parse_or("DATABASE_MAX_CONNECTIONS", Some("many".to_string()), 5u32)
            .unwrap_err();

        assert_eq!(
            error.to_string(),
            "DATABASE_MAX_CONNECTIONS has an invalid value: many"
        );
    }
}
