use num_bigint::BigUint;
use rustls::crypto::{ActiveKeyExchange, SharedSecret, SupportedKxGroup};
use rustls::ffdhe_groups::{self, FfdheGroup};
use rustls::NamedGroup;

use rustls::crypto::ring as provider;

/// Finite-field groups advertised by Firefox after the elliptic curves.
pub const FFDHE2048_KX_GROUP: FfdheKxGroup = FfdheKxGroup {
    name: NamedGroup::FFDHE2048,
    group: ffdhe_groups::FFDHE2048,
};
pub const FFDHE3072_KX_GROUP: FfdheKxGroup = FfdheKxGroup {
    name: NamedGroup::FFDHE3072,
    group: ffdhe_groups::FFDHE3072,
};

/// Length of the random private exponent, in bytes.
const PRIVATE_KEY_LEN: usize = 64;

/// A `SupportedKxGroup` backed by plain modular exponentiation.
///
/// Servers practically always pick one of the elliptic curves listed before these,
/// the groups are here so the `supported_groups` extension looks like Firefox's.
#[derive(Debug)]
pub struct FfdheKxGroup {
    name: NamedGroup,
    group: FfdheGroup<'static>,
}

impl SupportedKxGroup for FfdheKxGroup {
    fn start(&self) -> Result<Box<dyn ActiveKeyExchange>, rustls::Error> {
        let mut private_key = [0u8; PRIVATE_KEY_LEN];
        provider::default_provider()
            .secure_random
            .fill(&mut private_key)?;

        Ok(Box::new(FfdheKeyExchange::new(self.name, self.group, &private_key)))
    }

    fn ffdhe_group(&self) -> Option<FfdheGroup<'static>> {
        Some(self.group)
    }

    fn name(&self) -> NamedGroup {
        self.name
    }
}

struct FfdheKeyExchange {
    name: NamedGroup,
    group: FfdheGroup<'static>,
    modulus: BigUint,
    private_key: BigUint,
    public_key: Vec<u8>,
}

impl FfdheKeyExchange {
    fn new(name: NamedGroup, group: FfdheGroup<'static>, private_key: &[u8]) -> Self {
        let modulus = BigUint::from_bytes_be(group.p);
        let private_key = BigUint::from_bytes_be(private_key);

        let generator = BigUint::from_bytes_be(group.g);
        let public_key = to_fixed_be(&generator.modpow(&private_key, &modulus), group.p.len());

        FfdheKeyExchange { name, group, modulus, private_key, public_key }
    }
}

impl ActiveKeyExchange for FfdheKeyExchange {
    fn complete(self: Box<Self>, peer_pub_key: &[u8]) -> Result<SharedSecret, rustls::Error> {
        let peer_public_key = BigUint::from_bytes_be(peer_pub_key);
        let secret = peer_public_key.modpow(&self.private_key, &self.modulus);

        Ok(SharedSecret::from(&to_fixed_be(&secret, self.group.p.len())[..]))
    }

    fn pub_key(&self) -> &[u8] {
        &self.public_key
    }

    fn ffdhe_group(&self) -> Option<FfdheGroup<'static>> {
        Some(self.group)
    }

    fn group(&self) -> NamedGroup {
        self.name
    }
}

/// Big-endian bytes of `n`, left-padded with zeroes to `len`.
fn to_fixed_be(n: &BigUint, len: usize) -> Vec<u8> {
    let bytes = n.to_bytes_be();
    let mut padded = vec![0; len.saturating_sub(bytes.len())];
    padded.extend_from_slice(&bytes);
    padded
}
