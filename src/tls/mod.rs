mod ffdhe;
mod verifier;

use std::sync::Arc;

use crate::emulation::Browser;
use rustls::crypto::ring::{cipher_suite, default_provider, kx_group};
use rustls::crypto::{CryptoProvider, SupportedKxGroup};
use rustls::{RootCertStore, SupportedCipherSuite};

use verifier::NoVerifier;

pub struct TlsConfig {}

impl TlsConfig {
  pub fn builder() -> TlsConfigBuilder {
      TlsConfigBuilder::default()
  }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct TlsConfigBuilder {
  browser: Option<Browser>,
  ignore_tls_errors: bool,
}

static CHROME_CIPHER_SUITES: &[SupportedCipherSuite] = &[
  cipher_suite::TLS13_AES_128_GCM_SHA256,
  cipher_suite::TLS13_AES_256_GCM_SHA384,
  cipher_suite::TLS13_CHACHA20_POLY1305_SHA256,
  cipher_suite::TLS_ECDHE_ECDSA_WITH_AES_128_GCM_SHA256,
  cipher_suite::TLS_ECDHE_RSA_WITH_AES_128_GCM_SHA256,
  cipher_suite::TLS_ECDHE_ECDSA_WITH_AES_256_GCM_SHA384,
  cipher_suite::TLS_ECDHE_RSA_WITH_AES_256_GCM_SHA384,
  cipher_suite::TLS_ECDHE_ECDSA_WITH_CHACHA20_POLY1305_SHA256,
  cipher_suite::TLS_ECDHE_RSA_WITH_CHACHA20_POLY1305_SHA256,
];

static FIREFOX_CIPHER_SUITES: &[SupportedCipherSuite] = &[
  cipher_suite::TLS13_AES_128_GCM_SHA256,
  cipher_suite::TLS13_CHACHA20_POLY1305_SHA256,
  cipher_suite::TLS13_AES_256_GCM_SHA384,
  cipher_suite::TLS_ECDHE_ECDSA_WITH_AES_128_GCM_SHA256,
  cipher_suite::TLS_ECDHE_RSA_WITH_AES_128_GCM_SHA256,
  cipher_suite::TLS_ECDHE_ECDSA_WITH_CHACHA20_POLY1305_SHA256,
  cipher_suite::TLS_ECDHE_RSA_WITH_CHACHA20_POLY1305_SHA256,
  cipher_suite::TLS_ECDHE_ECDSA_WITH_AES_256_GCM_SHA384,
  cipher_suite::TLS_ECDHE_RSA_WITH_AES_256_GCM_SHA384,
];

static CHROME_KX_GROUPS: &[&dyn SupportedKxGroup] = &[
  kx_group::X25519,
  kx_group::SECP256R1,
  kx_group::SECP384R1,
];

static FIREFOX_KX_GROUPS: &[&dyn SupportedKxGroup] = &[
  kx_group::X25519,
  kx_group::SECP256R1,
  kx_group::SECP384R1,
  // TODO : add SECP521R1 once the ring provider supports it
  &ffdhe::FFDHE2048_KX_GROUP,
  &ffdhe::FFDHE3072_KX_GROUP,
];

impl TlsConfigBuilder {
  pub fn with_browser(&mut self, browser: Option<Browser>) -> &mut Self {
      self.browser = browser;
      self
  }

  pub fn with_ignore_tls_errors(&mut self, ignore_tls_errors: bool) -> &mut Self {
      self.ignore_tls_errors = ignore_tls_errors;
      self
  }

  fn crypto_provider(&self) -> CryptoProvider {
    match self.browser {
      Some(Browser::Chrome) => CryptoProvider {
        cipher_suites: CHROME_CIPHER_SUITES.to_vec(),
        kx_groups: CHROME_KX_GROUPS.to_vec(),
        ..default_provider()
      },
      Some(Browser::Firefox) => CryptoProvider {
        cipher_suites: FIREFOX_CIPHER_SUITES.to_vec(),
        kx_groups: FIREFOX_KX_GROUPS.to_vec(),
        ..default_provider()
      },
      None => default_provider(),
    }
  }

  pub fn build(self) -> Result<rustls::ClientConfig, rustls::Error> {
    let mut root_store = RootCertStore::empty();
    root_store.extend(
        webpki_roots::TLS_SERVER_ROOTS.iter().cloned(),
    );

    let crypto_provider = Arc::new(self.crypto_provider());

    let mut config = rustls::ClientConfig::builder_with_provider(crypto_provider.clone())
      .with_safe_default_protocol_versions()?
      .with_root_certificates(root_store)
      .with_no_client_auth();

    if self.ignore_tls_errors {
      config.dangerous().set_certificate_verifier(Arc::new(NoVerifier::new(crypto_provider)));
    }

    config.alpn_protocols = vec![b"h2".to_vec(), b"http/1.1".to_vec()];

    Ok(config)
  }
}
