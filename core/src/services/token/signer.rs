//! HS256 signing and verification of token envelopes

use chrono::Utc;
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};

use crate::domain::entities::token::{Claims, TokenKind, JWT_ISSUER};
use crate::domain::value_objects::SigningKey;
use crate::errors::TokenError;

/// Produces and verifies compact signed tokens
///
/// Immutable after construction, so a single instance is shared across
/// request handlers without locking.
pub struct TokenSigner {
    issuer: String,
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
    validation_ignoring_expiry: Validation,
}

impl TokenSigner {
    pub fn new(key: &SigningKey) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.set_issuer(&[JWT_ISSUER]);
        validation.set_required_spec_claims(&["exp", "iss", "sub"]);
        validation.validate_exp = true;
        validation.leeway = 0;

        let mut validation_ignoring_expiry = validation.clone();
        validation_ignoring_expiry.validate_exp = false;

        Self {
            issuer: JWT_ISSUER.to_string(),
            encoding_key: EncodingKey::from_secret(key.as_bytes()),
            decoding_key: DecodingKey::from_secret(key.as_bytes()),
            validation,
            validation_ignoring_expiry,
        }
    }

    /// Replaces the issuer written into and required from every token
    pub fn with_issuer(mut self, issuer: impl Into<String>) -> Self {
        self.issuer = issuer.into();
        self.validation.set_issuer(&[&self.issuer]);
        self.validation_ignoring_expiry.set_issuer(&[&self.issuer]);
        self
    }

    pub fn issuer(&self) -> &str {
        &self.issuer
    }

    /// Issues a token for `subject` valid for `ttl_seconds` from now
    pub fn issue(
        &self,
        subject: &str,
        kind: TokenKind,
        role: Option<&str>,
        ttl_seconds: i64,
    ) -> Result<String, TokenError> {
        if ttl_seconds <= 0 {
            return Err(TokenError::SigningFailed);
        }
        let mut claims =
            Claims::new(subject, kind, role.map(str::to_owned), Utc::now(), ttl_seconds);
        claims.iss = self.issuer.clone();
        self.sign(&claims)
    }

    /// Signs an explicit claim set
    pub fn sign(&self, claims: &Claims) -> Result<String, TokenError> {
        encode(&Header::new(Algorithm::HS256), claims, &self.encoding_key)
            .map_err(|_| TokenError::SigningFailed)
    }

    /// Verifies the signature and expiry, then decodes the claims
    pub fn parse(&self, token: &str) -> Result<Claims, TokenError> {
        self.decode_with(token, &self.validation)
    }

    /// Like [`parse`](Self::parse) but accepts tokens past their expiry
    pub fn parse_allow_expired(&self, token: &str) -> Result<Claims, TokenError> {
        self.decode_with(token, &self.validation_ignoring_expiry)
    }

    fn decode_with(&self, token: &str, validation: &Validation) -> Result<Claims, TokenError> {
        decode::<Claims>(token, &self.decoding_key, validation)
            .map(|data| data.claims)
            .map_err(|e| match e.kind() {
                ErrorKind::ExpiredSignature => TokenError::Expired,
                ErrorKind::InvalidSignature => TokenError::BadSignature,
                _ => TokenError::Malformed,
            })
    }
}

impl std::fmt::Debug for TokenSigner {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenSigner")
            .field("algorithm", &Algorithm::HS256)
            .field("issuer", &self.issuer)
            .finish_non_exhaustive()
    }
}
