use std::io::{self, Write};

use log::info;

use crate::response::FetchResponse;
use crate::retcher::{ErrorType, Retcher};

/// Writes the outcome of a request to `out`.
///
/// A successful response is written as its decoded body text, a failure as its error message.
/// Either way, exactly one line is written.
pub fn report<W: Write>(outcome: Result<FetchResponse, ErrorType>, out: &mut W) -> io::Result<()> {
  match outcome {
    Ok(response) => writeln!(out, "{}", response.text()),
    Err(err) => writeln!(out, "{}", err),
  }
}

/// Fetches `url` once with `retcher` and reports the outcome to `out`.
///
/// Request failures are reported, not returned. The only error this returns is a failure to write to `out`.
pub async fn fetch_and_report<W: Write>(retcher: &Retcher, url: &str, out: &mut W) -> io::Result<()> {
  info!("Fetching {}...", url);

  let outcome = retcher.retch(url, None).await;

  match &outcome {
    Ok(response) => info!("{} {} ({} bytes)", response.status, response.url, response.body.len()),
    Err(err) => info!("Fetching {} failed: {:?}", url, err),
  }

  report(outcome, out)
}
