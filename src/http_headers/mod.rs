use std::collections::HashMap;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use crate::emulation::Browser;
use crate::retcher::ErrorType;

mod statics;

pub struct HttpHeaders {
    context: HttpHeadersBuilder,
}

impl HttpHeaders {
    pub fn new(options: &HttpHeadersBuilder) -> HttpHeaders {
        HttpHeaders {
            context: options.clone(),
        }
    }

    pub fn get_builder() -> HttpHeadersBuilder {
        HttpHeadersBuilder::default()
    }
}

fn header_pair(name: &str, value: &str) -> Result<(HeaderName, HeaderValue), ErrorType> {
    let header_name = HeaderName::from_bytes(name.as_bytes())
        .map_err(|_| ErrorType::InvalidHeader(name.to_string()))?;
    let header_value = HeaderValue::from_str(value)
        .map_err(|_| ErrorType::InvalidHeader(name.to_string()))?;

    Ok((header_name, header_value))
}

impl TryFrom<HttpHeaders> for HeaderMap {
    type Error = ErrorType;

    fn try_from(value: HttpHeaders) -> Result<Self, Self::Error> {
        let context = value.context;
        let mut headers = HeaderMap::new();

        let header_values = match context.browser {
            Some(Browser::Chrome) => statics::CHROME_HEADERS,
            Some(Browser::Firefox) => statics::FIREFOX_HEADERS,
            None => &[]
        };

        let mut custom_headers: Vec<(&String, &String)> = context.custom_headers.iter().collect();
        custom_headers.sort();

        let mut used_custom_headers: Vec<String> = vec![];

        for (name, impersonated_value, https_only) in header_values {
            let custom_value = custom_headers
                .iter()
                .find(|(custom_name, _)| custom_name.eq_ignore_ascii_case(name));

            let value: &str = match custom_value {
                Some((custom_name, custom_value)) => {
                    used_custom_headers.push(custom_name.to_string());
                    custom_value.as_str()
                },
                None if *https_only && !context.https => continue,
                None => *impersonated_value,
            };

            let (header_name, header_value) = header_pair(name, value)?;
            headers.append(header_name, header_value);
        }

        for (name, value) in custom_headers {
            if !used_custom_headers.contains(name) {
                let (header_name, header_value) = header_pair(name, value)?;
                headers.append(header_name, header_value);
            }
        }

        Ok(headers)
    }
}

#[derive(Default, Clone)]
pub struct HttpHeadersBuilder {
    browser: Option<Browser>,
    https: bool,
    custom_headers: HashMap<String, String>,
}

impl HttpHeadersBuilder {
    pub fn with_browser (&mut self, browser: &Option<Browser>) -> &mut Self {
        self.browser = browser.to_owned();
        self
    }

    pub fn with_https (&mut self, https: bool) -> &mut Self {
        self.https = https;
        self
    }

    pub fn with_custom_headers (&mut self, custom_headers: &HashMap<String, String>) -> &mut Self {
        self.custom_headers = custom_headers.to_owned();
        self
    }

    pub fn build(&self) -> HttpHeaders {
        HttpHeaders::new(self)
    }
}
