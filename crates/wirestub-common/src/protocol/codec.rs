use crate::protocol::{Request, Response};

/// JSON codec for the wirestub envelopes.
///
/// JSON is the only serialization the protocol supports; both generated
/// halves use this codec so the bytes on the wire stay symmetrical.
///
/// # Example
///
/// ```
/// use wirestub_common::protocol::{JsonCodec, Request};
/// use serde_json::Map;
///
/// let request = Request::new("ping", Map::new());
/// let encoded = JsonCodec::encode_request(&request).unwrap();
/// let decoded = JsonCodec::decode_request(&encoded).unwrap();
/// assert_eq!(request, decoded);
/// ```
pub struct JsonCodec;

impl JsonCodec {
    /// Encode a request envelope to bytes.
    pub fn encode_request(request: &Request) -> serde_json::Result<Vec<u8>> {
        serde_json::to_vec(request)
    }

    /// Decode a request envelope from bytes.
    pub fn decode_request(data: &[u8]) -> serde_json::Result<Request> {
        serde_json::from_slice(data)
    }

    /// Encode a response envelope to bytes.
    pub fn encode_response(response: &Response) -> serde_json::Result<Vec<u8>> {
        serde_json::to_vec(response)
    }

    /// Decode a response envelope from bytes.
    pub fn decode_response(data: &[u8]) -> serde_json::Result<Response> {
        serde_json::from_slice(data)
    }
}
