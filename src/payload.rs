//! Binary payload encoding.
//!
//! Payloads are serialized as CBOR, which keeps field names next to values,
//! and then wrapped in standard base64 so they can sit inside a JSON string.

use crate::error::{CodecError, Result};
use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::io::Cursor;

/// Serialize `payload` into its binary form.
pub fn to_binary<T>(payload: &T) -> Result<Vec<u8>>
where
    T: Serialize + ?Sized,
{
    let mut buf = Vec::new();
    ciborium::ser::into_writer(payload, &mut buf)
        .map_err(|e| CodecError::Serialize(e.to_string()))?;
    Ok(buf)
}

/// Rebuild a value of type `T` from bytes produced by [`to_binary`].
///
/// The bytes must hold exactly one encoded value; anything left over after
/// it is rejected.
pub fn from_binary<T>(bytes: &[u8]) -> Result<T>
where
    T: DeserializeOwned,
{
    let mut reader = Cursor::new(bytes);
    let value = ciborium::de::from_reader(&mut reader)
        .map_err(|e| CodecError::Deserialize(e.to_string()))?;

    let consumed = reader.position() as usize;
    if consumed != bytes.len() {
        return Err(CodecError::Deserialize(format!(
            "{} trailing bytes after payload",
            bytes.len() - consumed
        )));
    }
    Ok(value)
}

/// Serialize `payload` and return it as base64 text.
///
/// **Errors**
/// - [`CodecError::Serialize`] if the payload's `Serialize` impl fails.
pub fn encode_payload<T>(payload: &T) -> Result<String>
where
    T: Serialize + ?Sized,
{
    let bytes = to_binary(payload)?;
    Ok(STANDARD.encode(bytes))
}

/// Decode text produced by [`encode_payload`] into a fresh value.
///
/// **Errors**
/// - [`CodecError::MissingPayload`] if `text` is empty.
/// - [`CodecError::Decode`] if `text` is not valid base64.
/// - [`CodecError::Deserialize`] if the bytes are truncated or describe a
///   different shape than `T`.
pub fn decode_payload<T>(text: &str) -> Result<T>
where
    T: DeserializeOwned,
{
    if text.is_empty() {
        return Err(CodecError::MissingPayload);
    }
    let bytes = STANDARD.decode(text)?;
    from_binary(&bytes)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;

    #[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
    struct Inner {
        count: i64,
        label: String,
    }

    #[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
    struct Outer {
        name: String,
        inner: Option<Box<Inner>>,
        tags: Vec<String>,
        ratio: f64,
        enabled: bool,
    }

    fn sample() -> Outer {
        Outer {
            name: "outer".to_string(),
            inner: Some(Box::new(Inner { count: -3, label: "inner".to_string() })),
            tags: vec!["a".to_string(), "b".to_string()],
            ratio: 0.25,
            enabled: true,
        }
    }

    #[test]
    fn nested_record_survives_encoding() {
        let original = sample();
        let text = encode_payload(&original).unwrap();
        let decoded: Outer = decode_payload(&text).unwrap();
        assert_eq!(decoded, original);
    }

    #[test]
    fn absent_nested_record_survives_encoding() {
        let original = Outer { inner: None, ..sample() };
        let decoded: Outer = decode_payload(&encode_payload(&original).unwrap()).unwrap();
        assert_eq!(decoded, original);
    }

    #[test]
    fn binary_form_keeps_field_names() {
        let bytes = to_binary(&sample()).unwrap();
        let needle = b"label";
        assert!(bytes.windows(needle.len()).any(|w| w == needle));
    }

    #[test]
    fn encoded_text_is_base64() {
        let text = encode_payload(&sample()).unwrap();
        assert!(text
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '+' || c == '/' || c == '='));
    }

    #[test]
    fn rejects_non_base64_text() {
        let err = decode_payload::<Outer>("definitely not base64!").unwrap_err();
        assert!(matches!(err, CodecError::Decode(_)));
    }

    #[test]
    fn rejects_wrong_shape() {
        let text = encode_payload("just a string").unwrap();
        let err = decode_payload::<Outer>(&text).unwrap_err();
        assert!(matches!(err, CodecError::Deserialize(_)));
    }

    #[test]
    fn rejects_truncated_bytes() {
        let mut bytes = to_binary(&sample()).unwrap();
        bytes.truncate(bytes.len() / 2);
        let text = STANDARD.encode(bytes);
        let err = decode_payload::<Outer>(&text).unwrap_err();
        assert!(matches!(err, CodecError::Deserialize(_)));
    }

    #[test]
    fn rejects_trailing_bytes() {
        let mut bytes = to_binary(&sample()).unwrap();
        bytes.extend_from_slice(b"\xff\xffGARBAGE");
        let err = from_binary::<Outer>(&bytes).unwrap_err();
        assert!(matches!(err, CodecError::Deserialize(ref msg) if msg.contains("trailing")));

        let err = decode_payload::<Outer>(&STANDARD.encode(&bytes)).unwrap_err();
        assert!(matches!(err, CodecError::Deserialize(_)));
    }

    #[test]
    fn empty_text_is_missing_payload() {
        let err = decode_payload::<Outer>("").unwrap_err();
        assert!(matches!(err, CodecError::MissingPayload));
    }
}
