use thiserror::Error;

#[derive(Debug, Error)]
#[error(transparent)]
pub struct Error(Box<ErrorKind>);

impl Error {
    pub fn kind(&self) -> &ErrorKind {
        self.0.as_ref()
    }

    pub fn into_kind(self) -> ErrorKind {
        *self.0
    }

    /// Returns `true` for errors caused by a malformed or truncated stream,
    /// including the ones attributed to a specific occurrence.
    pub fn is_format_error(&self) -> bool {
        match self.kind() {
            ErrorKind::InvalidFormat { .. } => true,
            ErrorKind::OccurrencePayload { source, .. } => source.is_format_error(),
            _ => false,
        }
    }

    pub fn invalid_format(name: impl Into<String>, message: impl Into<String>) -> Error {
        Error(
            ErrorKind::InvalidFormat {
                element: name.into(),
                message: message.into(),
            }
            .into(),
        )
    }

    pub fn invalid_arg(name: impl Into<String>, message: impl Into<String>) -> Error {
        Error(
            ErrorKind::InvalidArgument {
                name: name.into(),
                message: message.into(),
            }
            .into(),
        )
    }

    pub fn invalid_operation(name: impl Into<String>) -> Error {
        Error(ErrorKind::InvalidOperation { name: name.into() }.into())
    }

    /// Attributes this error to the occurrence with the given id.
    ///
    /// Errors that are already attributed keep their original id.
    pub fn for_occurrence(self, id: u32) -> Error {
        if matches!(self.kind(), ErrorKind::OccurrencePayload { .. }) {
            return self;
        }
        Error(ErrorKind::OccurrencePayload { id, source: self }.into())
    }

    /// Returns the id of the occurrence this error is attributed to, if any.
    pub fn occurrence_id(&self) -> Option<u32> {
        match self.kind() {
            ErrorKind::OccurrencePayload { id, .. } => Some(*id),
            _ => None,
        }
    }
}

#[derive(Debug, Error)]
pub enum ErrorKind {
    #[error("invalid argument {name}: {message}")]
    InvalidArgument { name: String, message: String },

    #[error("invalid operation {name}")]
    InvalidOperation { name: String },

    #[error("invalid storage format for '{element}': {message}")]
    InvalidFormat { element: String, message: String },

    #[error("malformed payload for occurrence {id}: {source}")]
    OccurrencePayload {
        id: u32,
        #[source]
        source: Error,
    },
}

impl From<ErrorKind> for Error {
    fn from(kind: ErrorKind) -> Self {
        Error(kind.into())
    }
}
