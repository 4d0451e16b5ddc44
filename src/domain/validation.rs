use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    Empty { field: &'static str },
    InvalidUrl { input: String },
    NoServers,
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty { field } => write!(f, "{field} must not be empty"),
            Self::InvalidUrl { input } => write!(f, "invalid server url: {input}"),
            Self::NoServers => write!(f, "at least one server url is required"),
        }
    }
}

impl std::error::Error for ValidationError {}

#[cfg(test)]
mod tests {
    use super::ValidationError;

    #[test]
    fn display_messages_are_human_readable() {
        let err = ValidationError::Empty { field: "username" };
        assert_eq!(err.to_string(), "username must not be empty");

        let err = ValidationError::InvalidUrl {
            input: "not a url".to_owned(),
        };
        assert_eq!(err.to_string(), "invalid server url: not a url");

        assert_eq!(
            ValidationError::NoServers.to_string(),
            "at least one server url is required"
        );
    }
}
