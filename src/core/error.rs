use serde::{Deserialize, Serialize};
use serde_json::Value;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    ToolMissing,
    InputFileMissing,

    ValidationInvalidArgument,

    GitCommandFailed,
    ArchiveFailed,

    InternalIoError,
    InternalUnexpected,
}

impl ErrorCode {
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorCode::ToolMissing => "tool.missing",
            ErrorCode::InputFileMissing => "input.file_missing",

            ErrorCode::ValidationInvalidArgument => "validation.invalid_argument",

            ErrorCode::GitCommandFailed => "git.command_failed",
            ErrorCode::ArchiveFailed => "archive.failed",

            ErrorCode::InternalIoError => "internal.io_error",
            ErrorCode::InternalUnexpected => "internal.unexpected",
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Hint {
    pub message: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ToolMissingDetails {
    pub tool: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InputFileMissingDetails {
    pub path: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub required_by: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InvalidArgumentDetails {
    pub field: String,
    pub problem: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InternalIoErrorDetails {
    pub error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub context: Option<String>,
}

#[derive(Debug, Clone)]
pub struct Error {
    pub code: ErrorCode,
    pub message: String,
    pub details: Value,
    pub hints: Vec<Hint>,
}

pub type Result<T> = std::result::Result<T, Error>;

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for Error {}

impl Error {
    pub fn new(code: ErrorCode, message: impl Into<String>, details: Value) -> Self {
        Self {
            code,
            message: message.into(),
            details,
            hints: Vec::new(),
        }
    }

    pub fn with_hint(mut self, hint: impl Into<String>) -> Self {
        self.hints.push(Hint {
            message: hint.into(),
        });
        self
    }

    pub fn tool_missing(tool: impl Into<String>) -> Self {
        let tool = tool.into();
        let details = serde_json::to_value(ToolMissingDetails { tool: tool.clone() })
            .unwrap_or_else(|_| Value::Object(serde_json::Map::new()));
        Self::new(
            ErrorCode::ToolMissing,
            format!("Required tool '{}' was not found on PATH", tool),
            details,
        )
        .with_hint(format!("Install '{}' and ensure it is on PATH", tool))
    }

    pub fn input_file_missing(path: impl Into<String>, required_by: Option<String>) -> Self {
        let path = path.into();
        let details = serde_json::to_value(InputFileMissingDetails {
            path: path.clone(),
            required_by,
        })
        .unwrap_or_else(|_| Value::Object(serde_json::Map::new()));
        Self::new(
            ErrorCode::InputFileMissing,
            format!("Required file not found: {}", path),
            details,
        )
    }

    pub fn validation_invalid_argument(
        field: impl Into<String>,
        problem: impl Into<String>,
    ) -> Self {
        let details = serde_json::to_value(InvalidArgumentDetails {
            field: field.into(),
            problem: problem.into(),
        })
        .unwrap_or_else(|_| Value::Object(serde_json::Map::new()));
        Self::new(
            ErrorCode::ValidationInvalidArgument,
            "Invalid argument",
            details,
        )
    }

    pub fn git_command_failed(message: impl Into<String>) -> Self {
        Self::new(
            ErrorCode::GitCommandFailed,
            message,
            Value::Object(serde_json::Map::new()),
        )
    }

    pub fn archive_failed(message: impl Into<String>) -> Self {
        Self::new(
            ErrorCode::ArchiveFailed,
            message,
            Value::Object(serde_json::Map::new()),
        )
    }

    pub fn internal_io(error: impl Into<String>, context: Option<String>) -> Self {
        let details = serde_json::to_value(InternalIoErrorDetails {
            error: error.into(),
            context,
        })
        .unwrap_or_else(|_| Value::Object(serde_json::Map::new()));
        Self::new(ErrorCode::InternalIoError, "I/O error", details)
    }

    pub fn internal_unexpected(message: impl Into<String>) -> Self {
        Self::new(
            ErrorCode::InternalUnexpected,
            message,
            Value::Object(serde_json::Map::new()),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn codes_are_dotted_strings() {
        assert_eq!(ErrorCode::ToolMissing.as_str(), "tool.missing");
        assert_eq!(ErrorCode::InputFileMissing.as_str(), "input.file_missing");
        assert_eq!(ErrorCode::GitCommandFailed.as_str(), "git.command_failed");
    }

    #[test]
    fn tool_missing_carries_install_hint() {
        let err = Error::tool_missing("git");
        assert_eq!(err.code, ErrorCode::ToolMissing);
        assert!(err.message.contains("git"));
        assert_eq!(err.hints.len(), 1);
        assert!(err.hints[0].message.contains("PATH"));
    }

    #[test]
    fn input_file_missing_records_path_in_details() {
        let err = Error::input_file_missing("test/browser_manifest.json", None);
        assert_eq!(err.details["path"], "test/browser_manifest.json");
    }
}
