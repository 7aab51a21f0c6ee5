//! Content hashing for resolved property sets.

use xxhash_rust::xxh3::Xxh3;

const UNIT_SEPARATOR: u8 = 0x1f;
const RECORD_SEPARATOR: u8 = 0x1e;

/// Hashes a canonical (name-sorted) property set.
pub(crate) fn content_hash(canonical: &[(String, String)]) -> u64 {
    let mut hasher = Xxh3::new();
    for (name, value) in canonical {
        hasher.update(name.as_bytes());
        hasher.update(&[UNIT_SEPARATOR]);
        hasher.update(value.as_bytes());
        hasher.update(&[RECORD_SEPARATOR]);
    }
    hasher.digest()
}

/// Renders a hash in lowercase base 36, which keeps class names short.
pub(crate) fn base36(mut n: u64) -> String {
    const DIGITS: &[u8; 36] = b"0123456789abcdefghijklmnopqrstuvwxyz";
    if n == 0 {
        return "0".to_string();
    }
    let mut buf = Vec::with_capacity(13);
    while n > 0 {
        buf.push(DIGITS[(n % 36) as usize]);
        n /= 36;
    }
    buf.reverse();
    String::from_utf8_lossy(&buf).into_owned()
}
