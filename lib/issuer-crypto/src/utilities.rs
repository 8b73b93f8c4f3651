use ct_codecs::{Base64UrlSafeNoPadding, Encoder};
use rand::distributions::{Alphanumeric, DistString};
use rand::{CryptoRng, RngCore, SeedableRng};
use rand_chacha::ChaCha20Rng;

pub fn generate_salt_base64_16() -> String {
    let seed = generate_random_bytes::<16>();

    //This operation should be safe as we control the input.
    Base64UrlSafeNoPadding::encode_to_string(seed).unwrap_or_default()
}

pub fn generate_alphanumeric(length: usize) -> String {
    Alphanumeric.sample_string(&mut get_rng(), length)
}

pub fn generate_random_bytes<const N: usize>() -> [u8; N] {
    let mut res = [0u8; N];
    get_rng().fill_bytes(&mut res);
    res
}

pub fn get_rng() -> impl RngCore + CryptoRng {
    ChaCha20Rng::from_entropy()
}
