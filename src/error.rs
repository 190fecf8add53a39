use core::fmt;

use crate::state::{BUFFER_LEN, STATE_LEN};

/// Error returned when a state record cannot be decoded back into an engine.
///
/// Import is atomic: when any variant of this error is returned, the target
/// engine's previous state is untouched.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum StateDecodeError {
    /// The record's byte length does not equal the fixed record size.
    InvalidLength {
        /// Number of bytes the caller supplied.
        len: usize,
    },
    /// The pending-block length byte exceeds the largest valid partial block.
    ///
    /// [`export_state`](crate::Md5::export_state) can never produce such a
    /// record; encountering one means the blob was corrupted or hand-built.
    InvalidBufferLen {
        /// Pending-block length claimed by the record.
        len: usize,
    },
}

impl StateDecodeError {
    /// Number of bytes required to decode a state record.
    pub const EXPECTED_LEN: usize = STATE_LEN;
}

impl fmt::Display for StateDecodeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidLength { len } => write!(
                f,
                "md5 state record requires {} bytes, received {len}",
                Self::EXPECTED_LEN
            ),
            Self::InvalidBufferLen { len } => write!(
                f,
                "md5 state record claims a {len}-byte pending block, maximum is {}",
                BUFFER_LEN - 1
            ),
        }
    }
}

impl std::error::Error for StateDecodeError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_names_expected_and_received_lengths() {
        let err = StateDecodeError::InvalidLength { len: 3 };
        let message = err.to_string();
        assert!(message.contains("89"));
        assert!(message.contains("3"));
    }

    #[test]
    fn display_names_pending_block_limit() {
        let err = StateDecodeError::InvalidBufferLen { len: 200 };
        let message = err.to_string();
        assert!(message.contains("200"));
        assert!(message.contains("63"));
    }
}
