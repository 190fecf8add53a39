//! MD5 block compression function.
//!
//! One call consumes exactly one 64-byte block and folds it into the running
//! accumulator using the standard four-round, 64-step RFC 1321 schedule. All
//! message words are read little-endian regardless of host byte order.

/// MD5 initial state constants.
pub(crate) const INIT_A: u32 = 0x67452301;
pub(crate) const INIT_B: u32 = 0xefcdab89;
pub(crate) const INIT_C: u32 = 0x98badcfe;
pub(crate) const INIT_D: u32 = 0x10325476;

/// MD5 round constants (integer parts of `abs(sin(i + 1)) * 2^32`).
const K: [u32; 64] = [
    0xd76aa478, 0xe8c7b756, 0x242070db, 0xc1bdceee, 0xf57c0faf, 0x4787c62a, 0xa8304613, 0xfd469501,
    0x698098d8, 0x8b44f7af, 0xffff5bb1, 0x895cd7be, 0x6b901122, 0xfd987193, 0xa679438e, 0x49b40821,
    0xf61e2562, 0xc040b340, 0x265e5a51, 0xe9b6c7aa, 0xd62f105d, 0x02441453, 0xd8a1e681, 0xe7d3fbc8,
    0x21e1cde6, 0xc33707d6, 0xf4d50d87, 0x455a14ed, 0xa9e3e905, 0xfcefa3f8, 0x676f02d9, 0x8d2a4c8a,
    0xfffa3942, 0x8771f681, 0x6d9d6122, 0xfde5380c, 0xa4beea44, 0x4bdecfa9, 0xf6bb4b60, 0xbebfbc70,
    0x289b7ec6, 0xeaa127fa, 0xd4ef3085, 0x04881d05, 0xd9d4d039, 0xe6db99e5, 0x1fa27cf8, 0xc4ac5665,
    0xf4292244, 0x432aff97, 0xab9423a7, 0xfc93a039, 0x655b59c3, 0x8f0ccc92, 0xffeff47d, 0x85845dd1,
    0x6fa87e4f, 0xfe2ce6e0, 0xa3014314, 0x4e0811a1, 0xf7537e82, 0xbd3af235, 0x2ad7d2bb, 0xeb86d391,
];

/// Compress one 64-byte block into the accumulator.
///
/// The accumulator is updated in place; partial blocks must never reach this
/// function.
pub(crate) fn compress_block(state: &mut [u32; 4], block: &[u8; 64]) {
    let mut m = [0u32; 16];
    for (word, chunk) in m.iter_mut().zip(block.chunks_exact(4)) {
        *word = u32::from_le_bytes(chunk.try_into().expect("chunks_exact yields 4-byte chunks"));
    }

    let [mut a, mut b, mut c, mut d] = *state;

    // Round 1: F = (B & C) | (!B & D)
    macro_rules! round1 {
        ($a:ident, $b:ident, $c:ident, $d:ident, $mi:expr, $ki:expr, $s:expr) => {{
            let f = ($b & $c) | (!$b & $d);
            let temp = $a
                .wrapping_add(f)
                .wrapping_add(K[$ki])
                .wrapping_add(m[$mi]);
            $a = $b.wrapping_add(temp.rotate_left($s));
        }};
    }

    round1!(a, b, c, d,  0,  0,  7); round1!(d, a, b, c,  1,  1, 12);
    round1!(c, d, a, b,  2,  2, 17); round1!(b, c, d, a,  3,  3, 22);
    round1!(a, b, c, d,  4,  4,  7); round1!(d, a, b, c,  5,  5, 12);
    round1!(c, d, a, b,  6,  6, 17); round1!(b, c, d, a,  7,  7, 22);
    round1!(a, b, c, d,  8,  8,  7); round1!(d, a, b, c,  9,  9, 12);
    round1!(c, d, a, b, 10, 10, 17); round1!(b, c, d, a, 11, 11, 22);
    round1!(a, b, c, d, 12, 12,  7); round1!(d, a, b, c, 13, 13, 12);
    round1!(c, d, a, b, 14, 14, 17); round1!(b, c, d, a, 15, 15, 22);

    // Round 2: G = (B & D) | (C & !D)
    macro_rules! round2 {
        ($a:ident, $b:ident, $c:ident, $d:ident, $mi:expr, $ki:expr, $s:expr) => {{
            let g = ($b & $d) | ($c & !$d);
            let temp = $a
                .wrapping_add(g)
                .wrapping_add(K[$ki])
                .wrapping_add(m[$mi]);
            $a = $b.wrapping_add(temp.rotate_left($s));
        }};
    }

    round2!(a, b, c, d,  1, 16,  5); round2!(d, a, b, c,  6, 17,  9);
    round2!(c, d, a, b, 11, 18, 14); round2!(b, c, d, a,  0, 19, 20);
    round2!(a, b, c, d,  5, 20,  5); round2!(d, a, b, c, 10, 21,  9);
    round2!(c, d, a, b, 15, 22, 14); round2!(b, c, d, a,  4, 23, 20);
    round2!(a, b, c, d,  9, 24,  5); round2!(d, a, b, c, 14, 25,  9);
    round2!(c, d, a, b,  3, 26, 14); round2!(b, c, d, a,  8, 27, 20);
    round2!(a, b, c, d, 13, 28,  5); round2!(d, a, b, c,  2, 29,  9);
    round2!(c, d, a, b,  7, 30, 14); round2!(b, c, d, a, 12, 31, 20);

    // Round 3: H = B ^ C ^ D
    macro_rules! round3 {
        ($a:ident, $b:ident, $c:ident, $d:ident, $mi:expr, $ki:expr, $s:expr) => {{
            let h = $b ^ $c ^ $d;
            let temp = $a
                .wrapping_add(h)
                .wrapping_add(K[$ki])
                .wrapping_add(m[$mi]);
            $a = $b.wrapping_add(temp.rotate_left($s));
        }};
    }

    round3!(a, b, c, d,  5, 32,  4); round3!(d, a, b, c,  8, 33, 11);
    round3!(c, d, a, b, 11, 34, 16); round3!(b, c, d, a, 14, 35, 23);
    round3!(a, b, c, d,  1, 36,  4); round3!(d, a, b, c,  4, 37, 11);
    round3!(c, d, a, b,  7, 38, 16); round3!(b, c, d, a, 10, 39, 23);
    round3!(a, b, c, d, 13, 40,  4); round3!(d, a, b, c,  0, 41, 11);
    round3!(c, d, a, b,  3, 42, 16); round3!(b, c, d, a,  6, 43, 23);
    round3!(a, b, c, d,  9, 44,  4); round3!(d, a, b, c, 12, 45, 11);
    round3!(c, d, a, b, 15, 46, 16); round3!(b, c, d, a,  2, 47, 23);

    // Round 4: I = C ^ (B | !D)
    macro_rules! round4 {
        ($a:ident, $b:ident, $c:ident, $d:ident, $mi:expr, $ki:expr, $s:expr) => {{
            let i_val = $c ^ ($b | !$d);
            let temp = $a
                .wrapping_add(i_val)
                .wrapping_add(K[$ki])
                .wrapping_add(m[$mi]);
            $a = $b.wrapping_add(temp.rotate_left($s));
        }};
    }

    round4!(a, b, c, d,  0, 48,  6); round4!(d, a, b, c,  7, 49, 10);
    round4!(c, d, a, b, 14, 50, 15); round4!(b, c, d, a,  5, 51, 21);
    round4!(a, b, c, d, 12, 52,  6); round4!(d, a, b, c,  3, 53, 10);
    round4!(c, d, a, b, 10, 54, 15); round4!(b, c, d, a,  1, 55, 21);
    round4!(a, b, c, d,  8, 56,  6); round4!(d, a, b, c, 15, 57, 10);
    round4!(c, d, a, b,  6, 58, 15); round4!(b, c, d, a, 13, 59, 21);
    round4!(a, b, c, d,  4, 60,  6); round4!(d, a, b, c, 11, 61, 10);
    round4!(c, d, a, b,  2, 62, 15); round4!(b, c, d, a,  9, 63, 21);

    state[0] = state[0].wrapping_add(a);
    state[1] = state[1].wrapping_add(b);
    state[2] = state[2].wrapping_add(c);
    state[3] = state[3].wrapping_add(d);
}
