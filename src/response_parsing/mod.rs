use encoding::{DecoderTrap, Encoding, EncodingRef};

/// Implements the BOM sniffing algorithm to detect the encoding of the response.
/// Returns the detected encoding and the length of the BOM, or `None` if there is no BOM.
///
/// See more details at https://encoding.spec.whatwg.org/#bom-sniff
fn bom_sniffing(bytes: &[u8]) -> Option<(EncodingRef, usize)> {
    if bytes.starts_with(&[0xEF, 0xBB, 0xBF]) {
        return Some((encoding::all::UTF_8 as EncodingRef, 3));
    }

    if bytes.starts_with(&[0xFE, 0xFF]) {
        return Some((encoding::all::UTF_16BE as EncodingRef, 2));
    }

    if bytes.starts_with(&[0xFF, 0xFE]) {
        return Some((encoding::all::UTF_16LE as EncodingRef, 2));
    }

    None
}

fn first_meta_attr(dom: &scraper::Html, selector: &str, attr: &str) -> Option<String> {
    let selector = scraper::Selector::parse(selector).ok()?;

    dom.select(&selector)
        .next()
        .and_then(|meta| meta.value().attr(attr))
        .map(String::from)
}

/// A lazy implementation of the prescan algorithm, using `scraper` to parse the HTML and extract the encoding.
///
/// See more details at https://html.spec.whatwg.org/#prescan-a-byte-stream-to-determine-its-encoding
pub fn prescan_bytestream(bytes: &[u8]) -> Option<EncodingRef> {
    let limit = std::cmp::min(1024, bytes.len());

    let ascii_body = encoding::all::ASCII
        .decode(&bytes[0..limit], DecoderTrap::Replace)
        .ok()?;
    let dom = scraper::Html::parse_document(&ascii_body);

    if let Some(charset) = first_meta_attr(&dom, "meta[charset]", "charset") {
        return encoding::label::encoding_from_whatwg_label(charset.trim());
    }

    if let Some(content) = first_meta_attr(&dom, "meta[http-equiv=content-type]", "content")
        .or_else(|| first_meta_attr(&dom, "meta[http-equiv=Content-Type]", "content"))
    {
        return match ContentType::from(&content) {
            Ok(content_type) => content_type.into(),
            Err(_) => None,
        };
    }

    None
}

/// Converts a slice of bytes to a string.
///
/// The encoding is picked in this order: the byte order mark (which is stripped), the prior knowledge
/// (usually from the `Content-Type` header), the HTML `<meta>` prescan and finally UTF-8.
/// Malformed sequences are replaced with U+FFFD.
pub fn decode(bytes: &[u8], encoding_prior_knowledge: Option<EncodingRef>) -> String {
    let mut encoding: EncodingRef = encoding::all::UTF_8;
    let mut payload = bytes;

    if let Some((enc, bom_length)) = bom_sniffing(bytes) {
        encoding = enc;
        payload = &bytes[bom_length..];
    } else if let Some(enc) = encoding_prior_knowledge {
        encoding = enc;
    } else if let Some(enc) = prescan_bytestream(bytes) {
        encoding = enc;
    }

    encoding
        .decode(payload, DecoderTrap::Replace)
        .unwrap_or_else(|_| String::from_utf8_lossy(payload).into_owned())
}

/// The `charset` parameter of a `Content-Type` header value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContentType {
    charset: String,
}

impl ContentType {
    pub fn from(content_type: &str) -> Result<Self, ()> {
        let lowercase = content_type.to_ascii_lowercase();
        let start = lowercase.find("charset=").ok_or(())? + "charset=".len();

        let charset = content_type[start..]
            .split(';')
            .next()
            .unwrap_or_default()
            .trim()
            .trim_matches(|c| c == '"' || c == '\'');

        if charset.is_empty() {
            return Err(());
        }

        Ok(ContentType {
            charset: String::from(charset),
        })
    }

    pub fn charset(&self) -> &str {
        &self.charset
    }
}

impl Into<Option<EncodingRef>> for ContentType {
    fn into(self) -> Option<EncodingRef> {
        encoding::label::encoding_from_whatwg_label(self.charset.as_str())
    }
}
