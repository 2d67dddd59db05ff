//! Error types for working-tree operations.
//!
//! One enum covers the whole crate. Failures are propagated verbatim to the
//! caller for display; nothing is retried or silently recovered.

use std::fmt;

#[derive(Debug)]
pub enum Error {
    /// An external command exited non-zero or failed to spawn. Carries the
    /// command's stderr (or the spawn error) as-is.
    CommandFailed(String),
    /// A rename's before/after halves could not be matched in the no-renames
    /// listing, or a resolved half was itself a rename. Fatal for the current
    /// operation.
    RenameResolution(String),
    /// The editor fallback chain came up empty. The front end should prompt
    /// the user to configure one.
    NoEditorConfigured,
    /// A filesystem delete or append failed.
    Io(std::io::Error),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::CommandFailed(msg) => write!(f, "{}", msg),
            Error::RenameResolution(msg) => write!(f, "{}", msg),
            Error::NoEditorConfigured => write!(
                f,
                "no editor defined in config file, core.editor, $GIT_EDITOR, $VISUAL, or $EDITOR"
            ),
            Error::Io(err) => write!(f, "{}", err),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::Io(err) => Some(err),
            _ => None,
        }
    }
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Error::Io(err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn io_errors_keep_their_source() {
        let err = Error::from(std::io::Error::new(std::io::ErrorKind::NotFound, "gone"));
        assert!(std::error::Error::source(&err).is_some());
        assert_eq!(err.to_string(), "gone");
    }

    #[test]
    fn no_editor_message_names_the_sources() {
        let msg = Error::NoEditorConfigured.to_string();
        assert!(msg.contains("$GIT_EDITOR"));
        assert!(msg.contains("$EDITOR"));
    }
}
