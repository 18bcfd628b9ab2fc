//! Typed wrappers for the backend endpoints.

pub mod carts;
pub mod orders;
pub mod phones;
pub mod users;

pub use carts::CartApi;
pub use orders::OrderApi;
pub use phones::PhoneApi;
pub use users::UserApi;

/// Percent-encode a value for use as one path segment.
pub(crate) fn path_segment(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for byte in value.bytes() {
        match byte {
            b'A'..=b'Z' | b'a'..=b'z' | b'0'..=b'9' | b'-' | b'_' | b'.' | b'~' => {
                out.push(char::from(byte));
            }
            other => out.push_str(&format!("%{other:02X}")),
        }
    }
    out
}
