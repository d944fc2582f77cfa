use std::time::Duration;
use log::debug;
use reqwest::header::HeaderMap;
use reqwest::Method;
use thiserror::Error;
use url::Url;

use crate::{emulation::Browser, http_headers::HttpHeaders, request::RequestOptions, response::FetchResponse, tls};

/// Error types that can be returned by the [`Retcher`] struct.
///
/// The `Display` implementation of every variant is a human-readable message,
/// which is what the `retcher` binary prints when a request fails.
#[derive(Debug, Error)]
pub enum ErrorType {
  /// The URL couldn't be parsed.
  #[error("invalid URL: {0}")]
  UrlParsingError(#[from] url::ParseError),
  /// The URL is missing the hostname.
  #[error("the URL is missing a hostname")]
  UrlMissingHostnameError,
  /// The URL uses an unsupported protocol.
  #[error("{0} is not a valid HTTP protocol.")]
  UrlProtocolError(String),
  /// A custom header name or value is not valid.
  #[error("invalid header: {0}")]
  InvalidHeader(String),
  /// The proxy URL passed to [`RetcherBuilder::with_proxy`] is not valid.
  #[error("invalid proxy URL {0}")]
  ProxyError(String),
  /// The TLS configuration couldn't be created.
  #[error("TLS configuration error: {0}")]
  TlsError(#[from] rustls::Error),
  /// The underlying `reqwest::Client` couldn't be created.
  #[error("couldn't create the HTTP client: {0}")]
  ClientError(#[source] reqwest::Error),
  /// The request failed (connection, TLS handshake, timeout, too many redirects...).
  ///
  /// The message includes the whole chain of causes, e.g. `...: tcp connect error: Connection refused (os error 111)`.
  #[error("{}", error_chain(.0))]
  RequestError(#[source] reqwest::Error),
  /// The response body couldn't be read.
  #[error("{}", error_chain(.0))]
  ResponseError(#[source] reqwest::Error),
}

/// `err` followed by its `source()` chain, joined with `": "`.
fn error_chain(err: &dyn std::error::Error) -> String {
  let mut message = err.to_string();
  let mut source = err.source();

  while let Some(cause) = source {
    message.push_str(": ");
    message.push_str(&cause.to_string());
    source = cause.source();
  }

  message
}

/// Retcher is the main struct used to make (impersonated) requests.
///
/// It uses `reqwest::Client` to make requests and holds info about the impersonated browser.
/// The configuration is fixed once the instance is built.
///
/// To create a new [`Retcher`] instance, use the [`Retcher::builder()`](RetcherBuilder) method.
pub struct Retcher {
  client: reqwest::Client,
  config: RetcherBuilder,
}

/// Customizes the behavior of the [`Retcher`] struct when following redirects.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RedirectBehavior {
  /// Follow up to `usize` redirects.
  ///
  /// If the number of redirects is exceeded, the client will return an error.
  FollowRedirect(usize),
  /// Don't follow any redirects.
  ///
  /// The client will return the response for the first request, even with the `3xx` status code.
  ManualRedirect,
}

/// A builder struct used to create a new [`Retcher`] instance.
///
/// ### Example
/// ```no_run
/// # use std::time::Duration;
/// # use retcher::retcher::Retcher;
/// # use retcher::emulation::Browser;
/// # async fn run() -> Result<(), retcher::retcher::ErrorType> {
/// let retcher = Retcher::builder()
///   .with_browser(Browser::Firefox)
///   .with_ignore_tls_errors(true)
///   .with_proxy("http://localhost:8080".to_string())
///   .with_default_timeout(Duration::from_secs(10))
///   .build()?;
///
/// let response = retcher.get("https://example.com", None).await?;
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct RetcherBuilder {
  browser: Option<Browser>,
  ignore_tls_errors: bool,
  proxy_url: Option<String>,
  request_timeout: Duration,
  redirect: RedirectBehavior,
}

impl Default for RetcherBuilder {
  fn default() -> Self {
    RetcherBuilder {
      browser: None,
      ignore_tls_errors: false,
      proxy_url: None,
      request_timeout: Duration::from_secs(30),
      redirect: RedirectBehavior::FollowRedirect(10),
    }
  }
}

impl RetcherBuilder {
  /// Sets the browser to impersonate.
  ///
  /// The [`Browser`] enum is used to set the HTTP headers and the TLS behaviour of the client.
  ///
  /// If not used, the client will use the default `reqwest` fingerprints.
  pub fn with_browser(mut self, browser: Browser) -> Self {
    self.browser = Some(browser);
    self
  }

  /// If set to true, the client will ignore TLS-related errors (invalid certificates and hostnames).
  pub fn with_ignore_tls_errors(mut self, ignore_tls_errors: bool) -> Self {
    self.ignore_tls_errors = ignore_tls_errors;
    self
  }

  /// Sets the proxy URL to use for all the requests made by the built [`Retcher`] instance.
  pub fn with_proxy(mut self, proxy_url: String) -> Self {
    self.proxy_url = Some(proxy_url);
    self
  }

  /// Sets the default timeout for requests.
  ///
  /// This setting can be overridden when making the request by using the `RequestOptions` struct.
  pub fn with_default_timeout(mut self, timeout: Duration) -> Self {
    self.request_timeout = timeout;
    self
  }

  /// Sets the desired redirect behavior.
  ///
  /// By default, the client will follow up to 10 redirects.
  pub fn with_redirect(mut self, behavior: RedirectBehavior) -> Self {
    self.redirect = behavior;
    self
  }

  pub fn browser(&self) -> Option<Browser> {
    self.browser
  }

  pub fn ignore_tls_errors(&self) -> bool {
    self.ignore_tls_errors
  }

  pub fn proxy_url(&self) -> Option<&str> {
    self.proxy_url.as_deref()
  }

  pub fn default_timeout(&self) -> Duration {
    self.request_timeout
  }

  pub fn redirect(&self) -> &RedirectBehavior {
    &self.redirect
  }

  /// Builds the [`Retcher`] instance.
  pub fn build(self) -> Result<Retcher, ErrorType> {
    Retcher::new(self)
  }
}

impl Retcher {
  pub fn builder() -> RetcherBuilder {
    RetcherBuilder::default()
  }

  fn new_reqwest_client(config: &RetcherBuilder) -> Result<reqwest::Client, ErrorType> {
    let tls_config = tls::TlsConfig::builder()
      .with_browser(config.browser)
      .with_ignore_tls_errors(config.ignore_tls_errors)
      .build()?;

    let mut client = reqwest::Client::builder()
      .danger_accept_invalid_certs(config.ignore_tls_errors)
      .danger_accept_invalid_hostnames(config.ignore_tls_errors)
      .use_preconfigured_tls(tls_config)
      .cookie_store(true)
      .timeout(config.request_timeout);

    if let Some(proxy_url) = &config.proxy_url {
      let proxy = reqwest::Proxy::all(proxy_url)
        .map_err(|_| ErrorType::ProxyError(proxy_url.clone()))?;
      client = client.proxy(proxy);
    }

    client = match config.redirect {
      RedirectBehavior::FollowRedirect(max) => client.redirect(reqwest::redirect::Policy::limited(max)),
      RedirectBehavior::ManualRedirect => client.redirect(reqwest::redirect::Policy::none()),
    };

    client.build().map_err(ErrorType::ClientError)
  }

  /// Creates a new [`Retcher`] instance based on the options stored in the [`RetcherBuilder`] instance.
  fn new(config: RetcherBuilder) -> Result<Self, ErrorType> {
    debug!("Building a client with {:?}", config);

    Ok(Retcher {
      client: Self::new_reqwest_client(&config)?,
      config,
    })
  }

  /// The configuration this instance was built with.
  pub fn config(&self) -> &RetcherBuilder {
    &self.config
  }

  fn parse_url(&self, url: &str) -> Result<Url, ErrorType> {
    let url = Url::parse(url)?;

    if url.host_str().is_none() {
      return Err(ErrorType::UrlMissingHostnameError);
    }

    match url.scheme() {
      "http" | "https" => Ok(url),
      protocol => Err(ErrorType::UrlProtocolError(protocol.to_string())),
    }
  }

  async fn make_request(&self, method: Method, url: &str, body: Option<Vec<u8>>, options: Option<RequestOptions>) -> Result<FetchResponse, ErrorType> {
    let options = options.unwrap_or_default();

    let parsed_url = self.parse_url(url)?;

    let headers: HeaderMap = HttpHeaders::get_builder()
      .with_browser(&self.config.browser)
      .with_https(parsed_url.scheme() == "https")
      .with_custom_headers(&options.headers)
      .build()
      .try_into()?;

    debug!("{} {} ({} headers)", method, parsed_url, headers.len());

    let mut request = self.client
      .request(method, parsed_url.clone())
      .headers(headers);

    if let Some(timeout) = options.timeout {
      request = request.timeout(timeout);
    }

    if let Some(body) = body {
      request = request.body(body);
    }

    let response = request.send().await.map_err(|err| {
      debug!("Request to {} failed: {:?}", parsed_url, err);
      ErrorType::RequestError(err)
    })?;

    debug!("{} responded with {}", response.url(), response.status());

    FetchResponse::from_reqwest(response, &parsed_url).await
  }

  /// Fetches the resource at `url` with a `GET` request, following the Fetch API naming.
  ///
  /// This is an alias for [`Retcher::get`].
  pub async fn retch(&self, url: &str, options: Option<RequestOptions>) -> Result<FetchResponse, ErrorType> {
    self.get(url, options).await
  }

  /// Makes a `GET` request to the specified URL.
  ///
  /// The `url` parameter should be a valid `http` or `https` URL.
  /// Additional options like `headers` or `timeout` can be passed via the `RequestOptions` struct.
  pub async fn get(&self, url: &str, options: Option<RequestOptions>) -> Result<FetchResponse, ErrorType> {
    self.make_request(Method::GET, url, None, options).await
  }

  /// Makes a `HEAD` request to the specified URL.
  pub async fn head(&self, url: &str, options: Option<RequestOptions>) -> Result<FetchResponse, ErrorType> {
    self.make_request(Method::HEAD, url, None, options).await
  }

  /// Makes an `OPTIONS` request to the specified URL.
  pub async fn options(&self, url: &str, options: Option<RequestOptions>) -> Result<FetchResponse, ErrorType> {
    self.make_request(Method::OPTIONS, url, None, options).await
  }

  /// Makes a `TRACE` request to the specified URL.
  pub async fn trace(&self, url: &str, options: Option<RequestOptions>) -> Result<FetchResponse, ErrorType> {
    self.make_request(Method::TRACE, url, None, options).await
  }

  /// Makes a `DELETE` request to the specified URL.
  pub async fn delete(&self, url: &str, options: Option<RequestOptions>) -> Result<FetchResponse, ErrorType> {
    self.make_request(Method::DELETE, url, None, options).await
  }

  /// Makes a `POST` request to the specified URL, sending `body` as the request body.
  pub async fn post(&self, url: &str, body: Option<Vec<u8>>, options: Option<RequestOptions>) -> Result<FetchResponse, ErrorType> {
    self.make_request(Method::POST, url, body, options).await
  }

  /// Makes a `PUT` request to the specified URL, sending `body` as the request body.
  pub async fn put(&self, url: &str, body: Option<Vec<u8>>, options: Option<RequestOptions>) -> Result<FetchResponse, ErrorType> {
    self.make_request(Method::PUT, url, body, options).await
  }

  /// Makes a `PATCH` request to the specified URL, sending `body` as the request body.
  pub async fn patch(&self, url: &str, body: Option<Vec<u8>>, options: Option<RequestOptions>) -> Result<FetchResponse, ErrorType> {
    self.make_request(Method::PATCH, url, body, options).await
  }
}
