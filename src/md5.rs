use core::fmt;

use crate::compress::{INIT_A, INIT_B, INIT_C, INIT_D, compress_block};

const BLOCK_LEN: usize = 64;

/// Incremental MD5 engine with exportable computation state.
///
/// The engine is a plain value type: [`update`](Self::update) absorbs bytes,
/// [`digest`](Self::digest) reads the current answer without disturbing the
/// stream, and [`Clone`] forks an independent computation. The complete state
/// can be captured with [`export_state`](Self::export_state) and restored
/// with [`import_state`](Self::import_state) or
/// [`from_state`](Self::from_state) to resume hashing in another process.
///
/// # Examples
///
/// ```
/// use resumable_md5::Md5;
///
/// let mut hasher = Md5::new();
/// hasher.update(b"hello ");
/// hasher.update(b"world");
///
/// // Equivalent to hashing the concatenation in one call.
/// assert_eq!(hasher.digest(), Md5::oneshot(b"hello world"));
///
/// // The engine is still live after reading a digest.
/// hasher.update(b"!");
/// assert_ne!(hasher.digest(), Md5::oneshot(b"hello world"));
/// ```
#[derive(Clone)]
pub struct Md5 {
    /// Accumulator words A, B, C, D.
    pub(crate) state: [u32; 4],
    /// Total bytes absorbed, mod 2^64.
    pub(crate) len: u64,
    /// Pending partial block; only the `buffer_len` prefix is meaningful.
    pub(crate) buffer: [u8; BLOCK_LEN],
    pub(crate) buffer_len: usize,
}

impl Md5 {
    /// Length of the produced digest in bytes.
    pub const DIGEST_LEN: usize = 16;

    /// Internal block length of the compression function in bytes.
    pub const BLOCK_LEN: usize = BLOCK_LEN;

    /// Creates an engine in the canonical initial state.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            state: [INIT_A, INIT_B, INIT_C, INIT_D],
            len: 0,
            buffer: [0; Self::BLOCK_LEN],
            buffer_len: 0,
        }
    }

    /// Creates an engine that has already absorbed `data`.
    ///
    /// # Examples
    ///
    /// ```
    /// use resumable_md5::Md5;
    ///
    /// let seeded = Md5::with_initial(b"abc");
    /// let mut manual = Md5::new();
    /// manual.update(b"abc");
    /// assert_eq!(seeded.digest(), manual.digest());
    /// ```
    #[must_use]
    pub fn with_initial(data: &[u8]) -> Self {
        let mut hasher = Self::new();
        hasher.update(data);
        hasher
    }

    /// Resets the engine back to the canonical initial state.
    pub fn reset(&mut self) {
        *self = Self::new();
    }

    /// Total number of bytes absorbed since construction, reset, or the last
    /// state import.
    #[must_use]
    pub const fn len(&self) -> u64 {
        self.len
    }

    /// Returns `true` if no bytes have been absorbed yet.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Absorbs additional bytes into the running computation.
    ///
    /// A zero-length slice is a no-op. Complete 64-byte blocks are compressed
    /// immediately; any remainder is buffered until later calls complete it.
    pub fn update(&mut self, mut data: &[u8]) {
        if data.is_empty() {
            return;
        }
        self.len = self.len.wrapping_add(data.len() as u64);

        // Top up a pending partial block first.
        if self.buffer_len > 0 {
            let take = (Self::BLOCK_LEN - self.buffer_len).min(data.len());
            self.buffer[self.buffer_len..self.buffer_len + take].copy_from_slice(&data[..take]);
            self.buffer_len += take;
            data = &data[take..];

            if self.buffer_len < Self::BLOCK_LEN {
                return;
            }
            let block = self.buffer;
            compress_block(&mut self.state, &block);
            self.buffer_len = 0;
        }

        let mut blocks = data.chunks_exact(Self::BLOCK_LEN);
        for block in &mut blocks {
            compress_block(
                &mut self.state,
                block.try_into().expect("chunks_exact yields 64-byte blocks"),
            );
        }

        let remainder = blocks.remainder();
        self.buffer[..remainder.len()].copy_from_slice(remainder);
        self.buffer_len = remainder.len();
    }

    /// Computes the 16-byte MD5 digest of everything absorbed so far.
    ///
    /// Finalization runs on a copy of the state: the live engine is never
    /// mutated, so repeated calls with no intervening [`update`](Self::update)
    /// return identical bytes and the stream can keep growing afterwards.
    #[must_use]
    pub fn digest(&self) -> [u8; Self::DIGEST_LEN] {
        let mut state = self.state;
        let bit_len = self.len.wrapping_mul(8);

        // Padding: 0x80 terminator, zeros to 56 mod 64, 64-bit LE bit count.
        let mut block = [0u8; Self::BLOCK_LEN];
        block[..self.buffer_len].copy_from_slice(&self.buffer[..self.buffer_len]);
        block[self.buffer_len] = 0x80;

        if self.buffer_len < 56 {
            block[56..].copy_from_slice(&bit_len.to_le_bytes());
            compress_block(&mut state, &block);
        } else {
            compress_block(&mut state, &block);
            let mut last = [0u8; Self::BLOCK_LEN];
            last[56..].copy_from_slice(&bit_len.to_le_bytes());
            compress_block(&mut state, &last);
        }

        let mut out = [0u8; Self::DIGEST_LEN];
        for (chunk, word) in out.chunks_exact_mut(4).zip(state) {
            chunk.copy_from_slice(&word.to_le_bytes());
        }
        out
    }

    /// Returns the digest as a 32-character lowercase hex string.
    ///
    /// # Examples
    ///
    /// ```
    /// use resumable_md5::Md5;
    ///
    /// assert_eq!(Md5::new().hexdigest(), "d41d8cd98f00b204e9800998ecf8427e");
    /// ```
    #[must_use]
    pub fn hexdigest(&self) -> String {
        use core::fmt::Write as _;

        let mut out = String::with_capacity(Self::DIGEST_LEN * 2);
        for byte in self.digest() {
            write!(&mut out, "{byte:02x}").expect("write! to String cannot fail");
        }
        out
    }

    /// Convenience helper that computes the MD5 digest of `data` in one shot.
    #[must_use]
    pub fn oneshot(data: &[u8]) -> [u8; Self::DIGEST_LEN] {
        Self::with_initial(data).digest()
    }
}

impl Default for Md5 {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for Md5 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Md5")
            .field("len", &self.len)
            .field("buffer_len", &self.buffer_len)
            .finish_non_exhaustive()
    }
}

impl PartialEq for Md5 {
    fn eq(&self, other: &Self) -> bool {
        // Buffer bytes past the valid prefix may hold stale data and must not
        // participate in equality.
        self.state == other.state
            && self.len == other.len
            && self.buffer[..self.buffer_len] == other.buffer[..other.buffer_len]
    }
}

impl Eq for Md5 {}
