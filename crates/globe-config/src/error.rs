//! Failures around the viewer's `config.ron`.

/// Why the viewer settings could not be loaded or persisted.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// `config.ron` exists but could not be read.
    #[error("cannot read viewer settings from config.ron: {0}")]
    ReadError(#[source] std::io::Error),

    /// The config directory or `config.ron` could not be written.
    #[error("cannot write viewer settings to config.ron: {0}")]
    WriteError(#[source] std::io::Error),

    /// `config.ron` is not valid RON for the viewer settings.
    #[error("config.ron has invalid viewer settings: {0}")]
    ParseError(#[source] ron::error::SpannedError),

    /// The settings could not be rendered as RON.
    #[error("cannot encode viewer settings as RON: {0}")]
    SerializeError(#[source] ron::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages_name_the_settings_file() {
        let read = ConfigError::ReadError(std::io::Error::from(std::io::ErrorKind::NotFound));
        assert!(read.to_string().starts_with("cannot read viewer settings from config.ron"));

        let parse = ron::from_str::<u32>("not a number").unwrap_err();
        let parse = ConfigError::ParseError(parse);
        assert!(parse.to_string().starts_with("config.ron has invalid viewer settings"));
    }

    #[test]
    fn test_source_is_kept() {
        use std::error::Error;
        let err = ConfigError::WriteError(std::io::Error::from(std::io::ErrorKind::PermissionDenied));
        let source = err.source().and_then(|s| s.downcast_ref::<std::io::Error>());
        assert_eq!(source.map(|e| e.kind()), Some(std::io::ErrorKind::PermissionDenied));
    }
}
