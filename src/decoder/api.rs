//! Public decode entry points.

use crate::error::{Error, Result};
use crate::value::Response;
use crate::xml::TokenSource;

use super::Decoder;

/// Decodes a complete XML-RPC methodResponse document.
///
/// Returns the payload of the first `<param>` as [`Response::Success`], a
/// `<fault>` payload as [`Response::Fault`], or [`Response::Empty`] when the
/// document carried no value at all. Decoding stops at the closing tag of
/// the first param or fault; any trailing input is not consumed.
///
/// # Example
///
/// ```
/// use rxmlrpc::{decode_response, Response, Value};
///
/// let xml = "<methodResponse><params><param>\
///            <value><string>ok</string></value>\
///            </param></params></methodResponse>";
/// assert_eq!(
///     decode_response(xml).unwrap(),
///     Response::Success(Value::Str("ok".into()))
/// );
/// ```
pub fn decode_response(xml: &str) -> Result<Response> {
    let mut tokens = TokenSource::new(xml);
    let mut decoder = Decoder::new();
    while let Some(token) = tokens.next_token()? {
        if let Some(response) = decoder.feed(token, &tokens)? {
            log::debug!("methodResponse decoded ({})", kind_of(&response));
            return Ok(response);
        }
    }
    log::debug!("document ended without a param or fault value");
    Ok(Response::Empty)
}

/// Decodes a methodResponse from a UTF-8 byte buffer.
pub fn decode_response_bytes(bytes: &[u8]) -> Result<Response> {
    let xml = std::str::from_utf8(bytes)
        .map_err(|err| Error::XmlParse(format!("input is not valid UTF-8: {err}")))?;
    decode_response(xml)
}

fn kind_of(response: &Response) -> &'static str {
    match response {
        Response::Success(_) => "param",
        Response::Fault(_) => "fault",
        Response::Empty => "empty",
    }
}
