/// Error fields of an unsuccessful envelope.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiFailure {
    pub code: String,
    pub tag: Option<String>,
    pub message: Option<String>,
    pub show_message: bool,
    pub show_tag: bool,
}

/// Result wrapper returned by every Panaccess function.
///
/// The answer is kept as the raw JSON fragment; its shape depends on the
/// function called and is decoded only after the success check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Envelope {
    pub(crate) success: bool,
    pub(crate) failure: Option<ApiFailure>,
    pub(crate) answer: Option<String>,
}

impl Envelope {
    /// `true` when the server reported success and no error code is set.
    pub fn is_success(&self) -> bool {
        self.success && self.failure.is_none()
    }

    pub fn failure(&self) -> Option<&ApiFailure> {
        self.failure.as_ref()
    }

    pub fn error_code(&self) -> Option<&str> {
        self.failure.as_ref().map(|failure| failure.code.as_str())
    }

    /// Raw JSON text of the `answer` field, if any.
    pub fn answer_json(&self) -> Option<&str> {
        self.answer.as_deref()
    }
}
