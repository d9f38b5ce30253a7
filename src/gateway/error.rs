//! Error types for the provider gateway.

use thiserror::Error;

/// Additional context from provider errors for debugging.
#[derive(Debug, Clone, Default)]
pub struct ErrorContext {
    /// HTTP status code from the provider.
    pub http_status: Option<u16>,
    /// Provider-specific error status (e.g. "PERMISSION_DENIED").
    pub provider_code: Option<String>,
    /// Request ID from provider headers.
    pub request_id: Option<String>,
}

impl ErrorContext {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_status(mut self, status: u16) -> Self {
        self.http_status = Some(status);
        self
    }

    pub fn with_code(mut self, code: impl Into<String>) -> Self {
        self.provider_code = Some(code.into());
        self
    }

    pub fn with_request_id(mut self, id: impl Into<String>) -> Self {
        self.request_id = Some(id.into());
        self
    }
}

/// Errors that can occur when calling the provider.
#[derive(Debug, Error)]
pub enum ProviderError {
    /// Malformed request - the provider rejected it outright.
    #[error("invalid request: {message}")]
    InvalidRequest {
        message: String,
        context: Option<ErrorContext>,
    },

    /// The provider blocked the prompt or response (safety filters).
    #[error("blocked: {message}")]
    Blocked {
        message: String,
        context: Option<ErrorContext>,
    },

    /// Provider-side failure or unparseable response.
    #[error("{provider} error: {message}")]
    Provider {
        provider: &'static str,
        message: String,
        context: Option<ErrorContext>,
    },

    /// HTTP/network error.
    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),

    /// Configuration error (bad credentials format, client build failure).
    #[error("configuration error: {0}")]
    Config(String),
}

impl ProviderError {
    pub fn invalid_request(message: impl Into<String>, context: ErrorContext) -> Self {
        Self::InvalidRequest {
            message: message.into(),
            context: Some(context),
        }
    }

    pub fn blocked(message: impl Into<String>) -> Self {
        Self::Blocked {
            message: message.into(),
            context: None,
        }
    }

    pub fn provider(provider: &'static str, message: impl Into<String>) -> Self {
        Self::Provider {
            provider,
            message: message.into(),
            context: None,
        }
    }

    pub fn provider_with_context(
        provider: &'static str,
        message: impl Into<String>,
        context: ErrorContext,
    ) -> Self {
        Self::Provider {
            provider,
            message: message.into(),
            context: Some(context),
        }
    }

    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    /// Short error code for logging.
    pub fn code(&self) -> &'static str {
        match self {
            Self::InvalidRequest { .. } => "invalid_request",
            Self::Blocked { .. } => "blocked",
            Self::Provider { .. } => "provider_error",
            Self::Http(_) => "http_error",
            Self::Config(_) => "config_error",
        }
    }

    pub fn context(&self) -> Option<&ErrorContext> {
        match self {
            Self::InvalidRequest { context, .. } => context.as_ref(),
            Self::Blocked { context, .. } => context.as_ref(),
            Self::Provider { context, .. } => context.as_ref(),
            Self::Http(_) => None,
            Self::Config(_) => None,
        }
    }

    /// Full diagnostic trace for the JSON report: the message plus whatever
    /// context the provider returned.
    pub fn trace(&self) -> String {
        let mut out = format!("{} [{}]", self, self.code());
        if let Some(ctx) = self.context() {
            if let Some(status) = ctx.http_status {
                out.push_str(&format!("\nhttp_status: {status}"));
            }
            if let Some(code) = &ctx.provider_code {
                out.push_str(&format!("\nprovider_code: {code}"));
            }
            if let Some(id) = &ctx.request_id {
                out.push_str(&format!("\nrequest_id: {id}"));
            }
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trace_includes_context_fields() {
        let err = ProviderError::provider_with_context(
            "vertex",
            "Permission denied",
            ErrorContext::new()
                .with_status(403)
                .with_code("PERMISSION_DENIED")
                .with_request_id("req-1"),
        );
        let trace = err.trace();
        assert!(trace.contains("Permission denied"));
        assert!(trace.contains("http_status: 403"));
        assert!(trace.contains("provider_code: PERMISSION_DENIED"));
        assert!(trace.contains("request_id: req-1"));
    }

    #[test]
    fn trace_without_context_is_single_line() {
        let err = ProviderError::config("GOOGLE_ACCESS_TOKEN malformed");
        assert_eq!(err.trace().lines().count(), 1);
        assert_eq!(err.code(), "config_error");
    }
}
