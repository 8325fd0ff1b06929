//! Photo payload encoding

use base64::{Engine, engine::general_purpose::STANDARD};

/// Build a `data:` URL for an uploaded image.
///
/// Returns `None` for anything that is not an `image/*` type.
pub fn encode_data_url(mime: &str, bytes: &[u8]) -> Option<String> {
    if !mime.starts_with("image/") {
        return None;
    }
    Some(format!("data:{};base64,{}", mime, STANDARD.encode(bytes)))
}
