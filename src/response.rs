use std::collections::HashMap;

use encoding::EncodingRef;
use reqwest::header::CONTENT_TYPE;
use url::Url;

use crate::response_parsing::{decode, ContentType};
use crate::retcher::ErrorType;

/// A fully-read HTTP response, shaped after the `Response` object of the Fetch API.
///
/// The body is read eagerly, so the connection is released by the time the caller sees the response.
#[derive(Debug, Clone)]
pub struct FetchResponse {
  /// The raw (already decompressed) response body.
  pub body: Vec<u8>,
  /// Response headers. Repeated headers are joined with `, `.
  pub headers: HashMap<String, String>,
  /// `true` for `2xx` status codes.
  pub ok: bool,
  /// `true` if the final URL differs from the requested one, i.e. at least one redirect was followed.
  pub redirected: bool,
  pub status: u16,
  /// The canonical reason phrase of the status code, or an empty string for unknown codes.
  pub status_text: String,
  /// The final URL of the response.
  pub url: String,
}

impl FetchResponse {
  pub(crate) async fn from_reqwest(response: reqwest::Response, requested_url: &Url) -> Result<Self, ErrorType> {
    let status = response.status();
    let url = response.url().clone();

    let mut headers: HashMap<String, String> = HashMap::new();
    for (name, value) in response.headers().iter() {
      let value = String::from_utf8_lossy(value.as_bytes()).into_owned();

      headers
        .entry(name.to_string())
        .and_modify(|existing| {
          existing.push_str(", ");
          existing.push_str(&value);
        })
        .or_insert_with(|| value.clone());
    }

    let body = response.bytes().await.map_err(ErrorType::ResponseError)?;

    Ok(FetchResponse {
      body: body.to_vec(),
      headers,
      ok: status.is_success(),
      redirected: &url != requested_url,
      status: status.as_u16(),
      status_text: status.canonical_reason().unwrap_or_default().to_string(),
      url: url.to_string(),
    })
  }

  /// The value of the `Content-Type` response header, if any.
  pub fn content_type(&self) -> Option<&str> {
    self.headers.get(CONTENT_TYPE.as_str()).map(String::as_str)
  }

  /// Decodes the body into a `String`.
  ///
  /// A byte order mark takes precedence, then the charset from the `Content-Type` header and the HTML `<meta>` tags are consulted.
  /// Falls back to UTF-8, replacing malformed sequences.
  pub fn text(&self) -> String {
    let encoding: Option<EncodingRef> = self
      .content_type()
      .and_then(|content_type| ContentType::from(content_type).ok())
      .and_then(|content_type| content_type.into());

    decode(&self.body, encoding)
  }
}
