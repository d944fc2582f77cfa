use std::{collections::HashMap, time::Duration};

/// A struct that holds the request options.
///
/// Unlike the [`RetcherBuilder`](crate::retcher::RetcherBuilder) struct, these options are specific to a single request.
///
/// Used by the [`Retcher`](crate::retcher::Retcher) struct's methods.
#[derive(Debug, Clone, Default)]
pub struct RequestOptions {
  /// A `HashMap` that holds custom HTTP headers.
  ///
  /// A custom header replaces the impersonated header with the same (case-insensitive) name, keeping its position.
  /// Other custom headers are sent after the impersonated ones.
  pub headers: HashMap<String, String>,
  /// The timeout for the request. This option overrides the global `Retcher` timeout.
  pub timeout: Option<Duration>,
}

impl RequestOptions {
  /// Adds a custom header to the request.
  pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
    self.headers.insert(name.into(), value.into());
    self
  }

  /// Sets the timeout for this request only.
  pub fn with_timeout(mut self, timeout: Duration) -> Self {
    self.timeout = Some(timeout);
    self
  }
}
