use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("config file not found: {0}")]
    FileNotFound(PathBuf),

    #[error("config parse error: {0}")]
    ParseError(String),

    #[error("config validation error: {0}")]
    ValidationError(String),
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum BindingError {
    #[error("key binding has an empty key")]
    EmptyKey,

    #[error("key binding has an empty key set")]
    EmptyKeySet,

    #[error("pointer binding has an empty event name")]
    EmptyEventName,

    #[error("invalid keybind '{combo}': {reason}")]
    InvalidKeybind { combo: String, reason: String },
}

#[derive(Debug, thiserror::Error)]
pub enum BridgeError {
    /// Forwarding was requested but the host exposes no invoke capability.
    #[error("bridge invoke function not found")]
    TransportMissing,

    #[error("unknown bridge command: {0}")]
    UnknownCommand(String),

    #[error("invalid {command} payload: {source}")]
    InvalidPayload {
        command: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("failed to serialize payload: {0}")]
    Serialize(#[from] serde_json::Error),
}

#[derive(Debug, thiserror::Error)]
pub enum InterceptError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Binding(#[from] BindingError),

    #[error(transparent)]
    Bridge(#[from] BridgeError),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_error_display() {
        let err = ConfigError::FileNotFound(PathBuf::from("/tmp/missing.toml"));
        assert_eq!(err.to_string(), "config file not found: /tmp/missing.toml");

        let err = ConfigError::ParseError("unexpected token".into());
        assert_eq!(err.to_string(), "config parse error: unexpected token");

        let err = ConfigError::ValidationError("keyboard[0]: empty key".into());
        assert_eq!(
            err.to_string(),
            "config validation error: keyboard[0]: empty key"
        );
    }

    #[test]
    fn binding_error_display() {
        assert_eq!(
            BindingError::EmptyKeySet.to_string(),
            "key binding has an empty key set"
        );

        let err = BindingError::InvalidKeybind {
            combo: "Hyper+A".into(),
            reason: "unrecognized modifier: Hyper".into(),
        };
        assert_eq!(
            err.to_string(),
            "invalid keybind 'Hyper+A': unrecognized modifier: Hyper"
        );
    }

    #[test]
    fn bridge_error_display() {
        assert_eq!(
            BridgeError::TransportMissing.to_string(),
            "bridge invoke function not found"
        );
        assert_eq!(
            BridgeError::UnknownCommand("plugin:other|x".into()).to_string(),
            "unknown bridge command: plugin:other|x"
        );
    }

    #[test]
    fn bridge_error_from_serde() {
        let source = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let err: BridgeError = source.into();
        assert!(matches!(err, BridgeError::Serialize(_)));
        assert!(err.to_string().starts_with("failed to serialize payload"));
    }

    #[test]
    fn intercept_error_from_bridge() {
        let err: InterceptError = BridgeError::TransportMissing.into();
        assert!(matches!(err, InterceptError::Bridge(BridgeError::TransportMissing)));
        assert!(err.to_string().contains("invoke function not found"));
    }

    #[test]
    fn intercept_error_from_config() {
        let err: InterceptError = ConfigError::ParseError("bad toml".into()).into();
        assert!(matches!(err, InterceptError::Config(_)));
        assert!(err.to_string().contains("bad toml"));
    }

    #[test]
    fn intercept_error_from_io() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file missing");
        let err: InterceptError = io_err.into();
        assert!(matches!(err, InterceptError::Io(_)));
        assert!(err.to_string().contains("file missing"));
    }
}
