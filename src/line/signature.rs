use base64ct::{Base64, Encoding};
use hmac::{Hmac, Mac};
use sha2::Sha256;
use tracing::warn;

type HmacSha256 = Hmac<Sha256>;

pub const SIGNATURE_HEADER: &str = "x-line-signature";

/// base64(HMAC-SHA256(channel secret, raw body)).
#[cfg(test)]
pub fn sign(secret: &str, body: &[u8]) -> anyhow::Result<String> {
    let mut mac = HmacSha256::new_from_slice(secret.as_bytes())
        .map_err(|e| anyhow::anyhow!(e.to_string()))?;
    mac.update(body);
    Ok(Base64::encode_string(&mac.finalize().into_bytes()))
}

/// Constant-time check of the webhook signature. An unset secret rejects everything.
pub fn verify(secret: &str, body: &[u8], signature: &str) -> bool {
    if secret.is_empty() {
        warn!("channel secret not configured; rejecting webhook");
        return false;
    }
    let Ok(expected) = Base64::decode_vec(signature.trim()) else {
        return false;
    };
    let Ok(mut mac) = HmacSha256::new_from_slice(secret.as_bytes()) else {
        return false;
    };
    mac.update(body);
    mac.verify_slice(&expected).is_ok()
}
