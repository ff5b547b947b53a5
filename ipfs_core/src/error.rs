use crate::transport::TransportError;

/// Failure of one client operation.
///
/// Every variant carries enough of the daemon's reply to diagnose the
/// problem without re-running the request.
#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error(transparent)]
    Transport(#[from] TransportError),

    #[error("malformed JSON in reply{}: {source}\nInput JSON:\n{input}", on_line(.line))]
    MalformedResponse {
        line: Option<usize>,
        input: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("unexpected reply: valid JSON, but without the \"{field}\" property{}:\n{value}", on_line(.line))]
    MissingField {
        field: String,
        line: Option<usize>,
        value: String,
    },

    #[error("could not find info for {key} in response: {body}")]
    NotFound { key: String, body: String },

    #[error("reply for {subject} failed verification: {response}")]
    VerificationFailed { subject: String, response: String },
}

impl Error {
    /// True when the operation was interrupted by an abort.
    pub fn is_aborted(&self) -> bool {
        matches!(self, Error::Transport(TransportError::Aborted))
    }
}

fn on_line(line: &Option<usize>) -> String {
    match line {
        Some(n) => format!(" on line {n}"),
        None => String::new(),
    }
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
