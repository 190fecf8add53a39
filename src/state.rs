//! Portable state record encoding for checkpoint/resume.
//!
//! The record is a fixed-size little-endian layout, not a memory dump, so a
//! blob written on one platform resumes correctly on any other:
//!
//! ```text
//! offset  0: accumulator A, B, C, D (4 x LE u32)
//! offset 16: total bytes absorbed (LE u64)
//! offset 24: pending partial block (64 bytes, zero filler past the prefix)
//! offset 88: pending-block prefix length (1 byte, 0-63)
//! total: 89 bytes
//! ```

use crate::Md5;
use crate::error::StateDecodeError;

/// Size in bytes of an exported state record.
pub const STATE_LEN: usize = 89;

/// Size in bytes of the pending-block region inside a state record.
pub(crate) const BUFFER_LEN: usize = 64;

const ACC_OFFSET: usize = 0;
const LEN_OFFSET: usize = 16;
const BUFFER_OFFSET: usize = 24;
const BUFFER_LEN_OFFSET: usize = 88;

impl Md5 {
    /// Captures the complete computation state as a fixed 89-byte record.
    ///
    /// The record is pure output: exporting never mutates the engine, and the
    /// bytes past the pending-block prefix are always zero so identical
    /// logical states export to identical blobs.
    ///
    /// # Examples
    ///
    /// ```
    /// use resumable_md5::{Md5, STATE_LEN};
    ///
    /// let mut hasher = Md5::new();
    /// hasher.update(b"partial inp");
    /// let blob = hasher.export_state();
    /// assert_eq!(blob.len(), STATE_LEN);
    ///
    /// let resumed = Md5::from_state(&blob).unwrap();
    /// assert_eq!(resumed.digest(), hasher.digest());
    /// ```
    #[must_use]
    pub fn export_state(&self) -> [u8; STATE_LEN] {
        let mut blob = [0u8; STATE_LEN];

        for (chunk, word) in blob[ACC_OFFSET..LEN_OFFSET]
            .chunks_exact_mut(4)
            .zip(self.state)
        {
            chunk.copy_from_slice(&word.to_le_bytes());
        }
        blob[LEN_OFFSET..BUFFER_OFFSET].copy_from_slice(&self.len.to_le_bytes());
        blob[BUFFER_OFFSET..BUFFER_OFFSET + self.buffer_len]
            .copy_from_slice(&self.buffer[..self.buffer_len]);
        blob[BUFFER_LEN_OFFSET] = self.buffer_len as u8;

        blob
    }

    /// Replaces the engine's state with one decoded from `blob`.
    ///
    /// The import is atomic: on any error the engine keeps its previous state
    /// and subsequent digests are unaffected.
    ///
    /// # Errors
    ///
    /// Returns [`StateDecodeError::InvalidLength`] when `blob` is not exactly
    /// [`STATE_LEN`] bytes, and [`StateDecodeError::InvalidBufferLen`] when
    /// the record claims a pending block of 64 bytes or more (a full block is
    /// always compressed, never buffered, so no valid export contains one).
    pub fn import_state(&mut self, blob: &[u8]) -> Result<(), StateDecodeError> {
        *self = Self::from_state(blob)?;
        Ok(())
    }

    /// Builds a new engine from a previously exported state record.
    ///
    /// Updates applied to the returned engine continue the exact computation
    /// that was checkpointed, including correct final padding, because the
    /// byte count and pending block are restored verbatim.
    ///
    /// # Errors
    ///
    /// Same as [`import_state`](Self::import_state).
    pub fn from_state(blob: &[u8]) -> Result<Self, StateDecodeError> {
        if blob.len() != STATE_LEN {
            return Err(StateDecodeError::InvalidLength { len: blob.len() });
        }

        let buffer_len = usize::from(blob[BUFFER_LEN_OFFSET]);
        if buffer_len >= BUFFER_LEN {
            return Err(StateDecodeError::InvalidBufferLen { len: buffer_len });
        }

        let mut state = [0u32; 4];
        for (word, chunk) in state
            .iter_mut()
            .zip(blob[ACC_OFFSET..LEN_OFFSET].chunks_exact(4))
        {
            *word = u32::from_le_bytes(chunk.try_into().expect("chunks_exact yields 4-byte chunks"));
        }

        let len = u64::from_le_bytes(
            blob[LEN_OFFSET..BUFFER_OFFSET]
                .try_into()
                .expect("length field is 8 bytes"),
        );

        let mut buffer = [0u8; BUFFER_LEN];
        buffer.copy_from_slice(&blob[BUFFER_OFFSET..BUFFER_LEN_OFFSET]);

        Ok(Self {
            state,
            len,
            buffer,
            buffer_len,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn export_layout_matches_documented_offsets() {
        let mut hasher = Md5::new();
        hasher.update(b"abc");
        let blob = hasher.export_state();

        // No block has been compressed yet, so the accumulator still holds
        // the canonical constants.
        assert_eq!(&blob[0..4], &0x67452301u32.to_le_bytes());
        assert_eq!(&blob[4..8], &0xefcdab89u32.to_le_bytes());
        assert_eq!(&blob[8..12], &0x98badcfeu32.to_le_bytes());
        assert_eq!(&blob[12..16], &0x10325476u32.to_le_bytes());
        assert_eq!(&blob[16..24], &3u64.to_le_bytes());
        assert_eq!(&blob[24..27], b"abc");
        assert!(blob[27..88].iter().all(|&b| b == 0));
        assert_eq!(blob[88], 3);
    }

    #[test]
    fn export_zero_fills_stale_buffer_bytes() {
        // Drain a full buffer so the in-memory tail is stale, then export.
        let mut hasher = Md5::new();
        hasher.update(&[0xabu8; 63]);
        hasher.update(&[0xab]);

        let blob = hasher.export_state();
        assert!(blob[24..88].iter().all(|&b| b == 0));
        assert_eq!(blob[88], 0);
    }

    #[test]
    fn round_trip_is_bit_exact() {
        let mut hasher = Md5::new();
        hasher.update(b"checkpointed bytes spanning a block boundary ".repeat(3).as_slice());

        let blob = hasher.export_state();
        let restored = Md5::from_state(&blob).expect("valid record must decode");
        assert_eq!(restored, hasher);
        assert_eq!(restored.export_state(), blob);
    }

    #[test]
    fn oversized_pending_block_is_rejected() {
        let mut blob = Md5::new().export_state();
        blob[88] = 64;
        assert_eq!(
            Md5::from_state(&blob),
            Err(StateDecodeError::InvalidBufferLen { len: 64 })
        );
    }
}
