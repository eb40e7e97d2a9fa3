//! Signed bearer-token codec.
//!
//! A token is `base64( hex(hmac_sha256(secret, payload)) "|" payload )`
//! where the payload is a JSON document carrying the user id and a Unix
//! expiry timestamp. Verification distinguishes malformed tokens, bad
//! signatures, and expired-but-authentic tokens.

use super::UserId;
use base64::Engine as _;
use base64::engine::general_purpose::STANDARD as BASE64;
use hmac::{Hmac, Mac};
use mockable::Clock;
use serde::{Deserialize, Serialize};
use sha2::Sha256;
use subtle::ConstantTimeEq as _;
use thiserror::Error;

type HmacSha256 = Hmac<Sha256>;

/// Token lifetime in seconds (seven days).
pub const TOKEN_TTL_SECS: i64 = 7 * 24 * 60 * 60;

/// Errors returned while issuing or verifying tokens.
#[derive(Debug, Error)]
pub enum TokenError {
    /// The token does not decode into a signature and payload pair.
    #[error("token is malformed")]
    Malformed,

    /// The payload does not match its signature.
    #[error("token signature mismatch")]
    SignatureMismatch,

    /// The token is authentic but past its expiry.
    #[error("token has expired")]
    Expired,

    /// The payload could not be serialised during issuance.
    #[error("token payload could not be encoded")]
    Encode(#[from] serde_json::Error),
}

#[derive(Debug, Serialize, Deserialize)]
struct TokenPayload {
    uid: u64,
    exp: i64,
}

/// Issues and verifies signed bearer tokens.
#[derive(Clone)]
pub struct TokenCodec {
    secret: String,
}

impl TokenCodec {
    /// Creates a codec signing with the given shared secret.
    #[must_use]
    pub fn new(secret: impl Into<String>) -> Self {
        Self {
            secret: secret.into(),
        }
    }

    /// Issues a token for `uid` expiring [`TOKEN_TTL_SECS`] from now.
    ///
    /// # Errors
    ///
    /// Returns [`TokenError::Encode`] when the payload cannot be
    /// serialised.
    pub fn issue(&self, uid: UserId, clock: &impl Clock) -> Result<String, TokenError> {
        let payload = serde_json::to_string(&TokenPayload {
            uid: uid.value(),
            exp: clock.utc().timestamp() + TOKEN_TTL_SECS,
        })?;
        let signature = self.sign(&payload)?;
        Ok(BASE64.encode(format!("{signature}|{payload}")))
    }

    /// Verifies a token and returns the user id it was issued for.
    ///
    /// # Errors
    ///
    /// Returns [`TokenError::Malformed`] when the token does not decode,
    /// [`TokenError::SignatureMismatch`] when the payload fails
    /// authentication, and [`TokenError::Expired`] for authentic tokens
    /// past their expiry.
    pub fn verify(&self, token: &str, clock: &impl Clock) -> Result<UserId, TokenError> {
        let decoded = BASE64.decode(token).map_err(|_| TokenError::Malformed)?;
        let decoded = String::from_utf8(decoded).map_err(|_| TokenError::Malformed)?;
        let (signature, payload) = decoded.split_once('|').ok_or(TokenError::Malformed)?;

        let expected = self.sign(payload)?;
        // Constant-time comparison to prevent timing attacks.
        if !bool::from(expected.as_bytes().ct_eq(signature.as_bytes())) {
            return Err(TokenError::SignatureMismatch);
        }

        let payload: TokenPayload =
            serde_json::from_str(payload).map_err(|_| TokenError::Malformed)?;
        if payload.exp <= clock.utc().timestamp() {
            return Err(TokenError::Expired);
        }
        Ok(UserId::new(payload.uid))
    }

    fn sign(&self, payload: &str) -> Result<String, TokenError> {
        // HMAC accepts keys of any length; the error arm is unreachable
        // in practice but propagated rather than panicked on.
        let mut mac = HmacSha256::new_from_slice(self.secret.as_bytes())
            .map_err(|_| TokenError::Malformed)?;
        mac.update(payload.as_bytes());
        Ok(hex::encode(mac.finalize().into_bytes()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{DateTime, Duration, Local, Utc};
    use mockable::DefaultClock;
    use rstest::{fixture, rstest};

    struct FixedClock(DateTime<Utc>);

    impl Clock for FixedClock {
        fn local(&self) -> DateTime<Local> {
            self.0.with_timezone(&Local)
        }

        fn utc(&self) -> DateTime<Utc> {
            self.0
        }
    }

    #[fixture]
    fn codec() -> TokenCodec {
        TokenCodec::new("unit-test-secret")
    }

    #[rstest]
    fn round_trip_returns_the_issued_uid(codec: TokenCodec) -> eyre::Result<()> {
        let clock = DefaultClock;
        let token = codec.issue(UserId::new(42), &clock)?;

        let verified = codec.verify(&token, &clock)?;

        assert_eq!(verified, UserId::new(42));
        Ok(())
    }

    #[rstest]
    fn tampered_payload_fails_with_signature_mismatch(codec: TokenCodec) -> eyre::Result<()> {
        let clock = DefaultClock;
        let token = codec.issue(UserId::new(42), &clock)?;
        let decoded = String::from_utf8(BASE64.decode(&token)?)?;
        let (signature, payload) = decoded
            .split_once('|')
            .ok_or_else(|| eyre::eyre!("token missing separator"))?;
        let tampered_payload = payload.replace("42", "43");
        let tampered = BASE64.encode(format!("{signature}|{tampered_payload}"));

        let result = codec.verify(&tampered, &clock);

        assert!(matches!(result, Err(TokenError::SignatureMismatch)));
        Ok(())
    }

    #[rstest]
    fn expired_token_is_rejected_after_ttl(codec: TokenCodec) -> eyre::Result<()> {
        let issued_at = Utc::now();
        let token = codec.issue(UserId::new(7), &FixedClock(issued_at))?;
        let after_expiry = FixedClock(issued_at + Duration::seconds(TOKEN_TTL_SECS + 1));

        let result = codec.verify(&token, &after_expiry);

        assert!(matches!(result, Err(TokenError::Expired)));
        Ok(())
    }

    #[rstest]
    fn token_remains_valid_just_before_expiry(codec: TokenCodec) -> eyre::Result<()> {
        let issued_at = Utc::now();
        let token = codec.issue(UserId::new(7), &FixedClock(issued_at))?;
        let near_expiry = FixedClock(issued_at + Duration::seconds(TOKEN_TTL_SECS - 1));

        let verified = codec.verify(&token, &near_expiry)?;

        assert_eq!(verified, UserId::new(7));
        Ok(())
    }

    #[rstest]
    #[case("not-base64!!")]
    #[case("")]
    fn undecodable_tokens_are_malformed(codec: TokenCodec, #[case] token: &str) {
        // Empty input decodes to an empty string with no separator.
        let result = codec.verify(token, &DefaultClock);

        assert!(matches!(result, Err(TokenError::Malformed)));
    }

    #[rstest]
    fn decoded_text_without_separator_is_malformed(codec: TokenCodec) {
        let token = BASE64.encode("no separator here");

        let result = codec.verify(&token, &DefaultClock);

        assert!(matches!(result, Err(TokenError::Malformed)));
    }

    #[rstest]
    fn different_secret_fails_verification(codec: TokenCodec) -> eyre::Result<()> {
        let clock = DefaultClock;
        let token = codec.issue(UserId::new(42), &clock)?;
        let other = TokenCodec::new("a completely different secret");

        let result = other.verify(&token, &clock);

        assert!(matches!(result, Err(TokenError::SignatureMismatch)));
        Ok(())
    }
}
