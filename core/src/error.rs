//! Error taxonomy for the frame-delivery and input-bridging loop.
//!
//! Recoverable conditions (unmapped keys, redundant play/pause, input with
//! no session) never show up here: they are absorbed where they happen.
//! What remains is either a rejected ROM, a bad configuration, or a fatal
//! failure that halts the run loop.

use thiserror::Error;

/// The emulation core refused a ROM image (bad header, unsupported mapper, ...).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid ROM: {0}")]
pub struct InvalidRom(pub String);

/// The emulation core and this bridge disagree about the interface contract.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ContractViolation {
    /// A pulled frame was not `3 * width * height` bytes long.
    #[error("frame buffer is {actual} bytes, expected {expected}")]
    FrameLength { expected: usize, actual: usize },

    /// A frame tick fired while no session was installed.
    #[error("frame tick fired with no active session")]
    TickWithoutSession,
}

/// Rejected configuration values.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to parse configuration: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("scale factor must be at least 1, got {0}")]
    InvalidScale(u32),

    #[error("overscan crops {top}+{bottom} rows of a {height}-row screen")]
    InvalidOverscan { top: u32, bottom: u32, height: u32 },

    #[error("empty key code bound to {0}")]
    UnknownKey(String),

    #[error("key {key} is bound to both {first} and {second}")]
    DuplicateKey {
        key: String,
        first: String,
        second: String,
    },
}

#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    InvalidRom(#[from] InvalidRom),

    #[error("contract violation: {0}")]
    Contract(#[from] ContractViolation),

    #[error("failed to schedule frame: {0}")]
    Schedule(String),

    #[error("failed to present frame: {0}")]
    Present(String),

    #[error(transparent)]
    Config(#[from] ConfigError),
}

impl Error {
    /// Fatal errors halt the run loop and are never retried.
    pub fn is_fatal(&self) -> bool {
        matches!(
            self,
            Self::Contract(_) | Self::Schedule(_) | Self::Present(_)
        )
    }
}

pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fatal_classification() {
        assert!(Error::from(ContractViolation::TickWithoutSession).is_fatal());
        assert!(Error::Schedule("denied".into()).is_fatal());
        assert!(Error::Present("lost context".into()).is_fatal());
        assert!(!Error::from(InvalidRom("bad header".into())).is_fatal());
        assert!(!Error::from(ConfigError::InvalidScale(0)).is_fatal());
    }

    #[test]
    fn test_frame_length_message() {
        let err = ContractViolation::FrameLength {
            expected: 184_320,
            actual: 12,
        };
        assert_eq!(
            err.to_string(),
            "frame buffer is 12 bytes, expected 184320"
        );
    }
}
