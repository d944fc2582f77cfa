//! # retcher | browser impersonation made simple
//!
//! `retcher` is a `rust` library that allows you to impersonate a browser and make requests to websites.
//! It is built on top of `reqwest`, `rustls` and `tokio`.
//!
//! The library provides a fetch-like API for making requests to websites, and it also allows you to
//! customize the request headers, use proxies, custom timeouts, redirect limits and more.
//!
//! ```no_run
//! use retcher::retcher::Retcher;
//! use retcher::emulation::Browser;
//!
//! #[tokio::main]
//! async fn main() {
//!    let retcher = Retcher::builder()
//!        .with_browser(Browser::Firefox)
//!        .with_ignore_tls_errors(true)
//!        .build()
//!        .unwrap();
//!
//!    match retcher.retch("https://example.com", None).await {
//!        Ok(response) => println!("{}", response.text()),
//!        Err(e) => println!("{}", e),
//!    }
//! }
//! ```
//!
//! ### Binary
//!
//! The crate also ships the `retcher` binary, which fetches a single URL with a Firefox-impersonating
//! client and prints either the decoded response body or the error message.
//! Set `RUST_LOG=debug` to see what the client is doing (logs go to stderr).

mod http_headers;
mod tls;
mod response_parsing;

/// Main module that contains the `Retcher` struct and its methods.
pub mod retcher;

/// Customizing request options.
pub mod request;

/// The fetch-like response type returned by [`Retcher`](crate::retcher::Retcher).
pub mod response;

/// Fetch-and-report helpers used by the `retcher` binary.
pub mod report;

/// Contains browser emulation-related types and functions.
pub mod emulation {

  /// The `Browser` enum is used to specify the browser that should be impersonated.
  ///
  /// It can be passed as a parameter to [`RetcherBuilder::with_browser`](crate::retcher::RetcherBuilder::with_browser)
  /// to use the browser emulation with the built [`Retcher`](crate::retcher::Retcher) instance.
  #[derive(PartialEq, Eq, Debug, Clone, Copy, Default)]
  pub enum Browser {
    #[default]
    Chrome,
    Firefox,
  }
}

/// Various utility functions and types.
pub mod utils {
  pub use crate::response_parsing::decode;
  pub use crate::response_parsing::ContentType;
  pub use encoding::all as encodings;
}
