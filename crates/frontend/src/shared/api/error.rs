use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ApiError {
    #[error("Network error: {0}")]
    Transport(String),
    #[error("{}", http_summary(.status, .messages))]
    Http {
        status: u16,
        /// Headline from the error body, if it had one
        message: Option<String>,
        messages: Vec<String>,
    },
    #[error("Failed to parse response: {0}")]
    Decode(String),
    #[error("Failed to serialize request: {0}")]
    Serialize(String),
}

fn http_summary(status: &u16, messages: &[String]) -> String {
    if messages.is_empty() {
        format!("Request failed with status {}", status)
    } else {
        messages.join("; ")
    }
}

impl ApiError {
    /// Messages to show the user, one toast each
    pub fn messages(&self) -> Vec<String> {
        match self {
            Self::Http { status, messages, .. } if messages.is_empty() => {
                vec![http_summary(status, messages)]
            }
            Self::Http { messages, .. } => messages.clone(),
            other => vec![other.to_string()],
        }
    }

    /// Single-line form used for query error state: the body's headline
    /// before the joined details
    pub fn user_message(&self) -> String {
        match self {
            Self::Http {
                message: Some(message), ..
            } => message.clone(),
            other => other.to_string(),
        }
    }

    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Http { status, .. } => Some(*status),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_http_error_without_body_message() {
        let err = ApiError::Http {
            status: 502,
            message: None,
            messages: vec![],
        };
        assert_eq!(err.messages(), vec!["Request failed with status 502".to_string()]);
        assert_eq!(err.status(), Some(502));
    }

    #[test]
    fn test_http_error_joins_details() {
        let err = ApiError::Http {
            status: 422,
            message: None,
            messages: vec!["a".into(), "b".into()],
        };
        assert_eq!(err.user_message(), "a; b");
        assert_eq!(err.messages().len(), 2);
    }

    #[test]
    fn test_user_message_prefers_headline_over_details() {
        let err = ApiError::Http {
            status: 422,
            message: Some("Validation failed".into()),
            messages: vec!["name is required".into(), "code is taken".into()],
        };
        assert_eq!(err.user_message(), "Validation failed");
        assert_eq!(
            err.messages(),
            vec!["name is required".to_string(), "code is taken".to_string()]
        );
    }

    #[test]
    fn test_transport_error_message() {
        let err = ApiError::Transport("connection refused".into());
        assert_eq!(err.messages(), vec!["Network error: connection refused".to_string()]);
        assert_eq!(err.status(), None);
    }
}
