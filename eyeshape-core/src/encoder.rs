//! Transport encoding for captured images.

use base64::{engine::general_purpose::STANDARD, Engine};
use serde::{Deserialize, Serialize};

use crate::capture::CapturedImage;

/// Base64 image payload as carried in the analysis request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransportPayload {
    pub mime_type: String,
    /// Standard base64 without any `data:` prefix.
    pub data: String,
}

/// Encode an image's bytes for transport.
pub fn encode(image: &CapturedImage) -> TransportPayload {
    TransportPayload {
        mime_type: image.mime_type.clone(),
        data: STANDARD.encode(&image.bytes),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn image(bytes: &[u8]) -> CapturedImage {
        CapturedImage {
            file_name: "me.jpg".to_string(),
            mime_type: "image/jpeg".to_string(),
            bytes: bytes.to_vec(),
        }
    }

    #[test]
    fn test_encode_is_plain_base64() {
        let payload = encode(&image(b"hello"));
        assert_eq!(payload.mime_type, "image/jpeg");
        assert_eq!(payload.data, "aGVsbG8=");
        assert!(!payload.data.starts_with("data:"));
    }

    #[test]
    fn test_encode_is_deterministic() {
        let img = image(&[0xFF, 0xD8, 0xFF, 0xE0, 0x00]);
        assert_eq!(encode(&img), encode(&img));
    }

    #[test]
    fn test_encode_empty() {
        assert_eq!(encode(&image(&[])).data, "");
    }

    #[test]
    fn test_payload_serializes_camel_case() {
        let json = serde_json::to_value(encode(&image(b"x"))).unwrap();
        assert_eq!(json["mimeType"], "image/jpeg");
        assert_eq!(json["data"], "eA==");
    }
}
