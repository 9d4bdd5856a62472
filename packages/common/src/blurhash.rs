//! Structural validity check for BlurHash strings.
//!
//! A hash is decodable when every character belongs to the base-83 alphabet and
//! its length matches the component counts encoded in the size flag. Pixel
//! decoding is not needed to establish that.

const BASE83: &[u8; 83] =
    b"0123456789ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz#$%*+,-.:;=?@[]^_{|}~";

fn decode_digit(c: u8) -> Option<usize> {
    BASE83.iter().position(|&d| d == c)
}

/// Number of (x, y) components encoded by the hash, if it is well formed.
pub fn components(hash: &str) -> Option<(usize, usize)> {
    let bytes = hash.as_bytes();
    if bytes.len() < 6 || !bytes.iter().all(|&b| decode_digit(b).is_some()) {
        return None;
    }

    let size_flag = decode_digit(bytes[0])?;
    let x = size_flag % 9 + 1;
    let y = size_flag / 9 + 1;

    (bytes.len() == 4 + 2 * x * y).then_some((x, y))
}

pub fn is_valid(hash: &str) -> bool {
    components(hash).is_some()
}
