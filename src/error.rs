/// Errors produced while building, rendering or reading back log records.
#[derive(thiserror::Error, Debug)]
pub enum CodecError {
    /// The payload could not be turned into its binary form.
    #[error("failed to serialize payload: {0}")]
    Serialize(String),

    /// The record could not be rendered as a line.
    #[error("failed to render log record: {0}")]
    Render(#[source] serde_json::Error),

    /// The line is not a JSON object with the expected record fields.
    #[error("failed to parse log line: {0}")]
    Parse(#[source] serde_json::Error),

    /// The encoded payload is not valid base64.
    #[error("encoded payload is not valid base64: {0}")]
    Decode(#[from] base64::DecodeError),

    /// The decoded bytes do not describe a value of the requested type.
    #[error("failed to deserialize payload: {0}")]
    Deserialize(String),

    /// The record carries an empty `thingEncoded` because its payload
    /// failed to serialize.
    #[error("log record carries no encoded payload")]
    MissingPayload,
}

pub type Result<T> = std::result::Result<T, CodecError>;
