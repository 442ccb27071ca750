//! Application error type.
//!
//! Every failure carries the process exit code it should map to:
//!
//! - `2` — bad usage, configuration, or input (missing directory, bad CSV schema)
//! - `3` — nothing to audit (instrument not found)
//! - `4` — a processing or write step failed partway

#[derive(Clone)]
pub struct AppError {
    exit_code: u8,
    message: String,
}

impl AppError {
    /// Bad usage, configuration, or input data.
    pub fn usage(message: impl Into<String>) -> Self {
        Self::with_code(2, message)
    }

    /// No usable data for the request.
    pub fn no_data(message: impl Into<String>) -> Self {
        Self::with_code(3, message)
    }

    /// A processing or file-write step failed.
    pub fn processing(message: impl Into<String>) -> Self {
        Self::with_code(4, message)
    }

    fn with_code(exit_code: u8, message: impl Into<String>) -> Self {
        Self {
            exit_code,
            message: message.into(),
        }
    }

    pub fn exit_code(&self) -> u8 {
        self.exit_code
    }
}

impl std::fmt::Display for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::fmt::Debug for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppError")
            .field("exit_code", &self.exit_code)
            .field("message", &self.message)
            .finish()
    }
}

impl std::error::Error for AppError {}
