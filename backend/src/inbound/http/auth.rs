//! Bearer-token authentication for the HTTP surface.
//!
//! Access and refresh tokens are HS256 JWTs whose claims carry the user's
//! identity, role, and verification flag, so authorisation gates read the
//! credential instead of re-querying the store.

use actix_web::dev::Payload;
use actix_web::http::header;
use actix_web::{web, FromRequest, HttpRequest};
use chrono::{Duration, Utc};
use futures_util::future::{ready, Ready};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::user::{Actor, Role, User};
use crate::domain::Error;

/// Discriminates access from refresh tokens inside the claims.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TokenKind {
    Access,
    Refresh,
}

/// Claims embedded in every issued token.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// User identifier, stringified.
    pub sub: String,
    pub full_name: String,
    pub role: Role,
    pub email: Option<String>,
    pub is_verified: bool,
    pub token_kind: TokenKind,
    pub iat: i64,
    pub exp: i64,
}

impl Claims {
    /// Derive the acting principal from the claims.
    pub fn actor(&self) -> Result<Actor, Error> {
        let user_id = self
            .sub
            .parse::<i64>()
            .map_err(|_| Error::unauthorized("malformed token subject"))?;
        Ok(Actor::new(user_id, self.role))
    }
}

/// Issued token pair returned by `POST /api/token`.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct TokenPair {
    pub access: String,
    pub refresh: String,
}

/// Encodes and validates bearer tokens.
#[derive(Clone)]
pub struct JwtCodec {
    encoding: EncodingKey,
    decoding: DecodingKey,
    access_ttl: Duration,
    refresh_ttl: Duration,
}

impl JwtCodec {
    /// Codec with the default token lifetimes (15 minutes / 7 days).
    pub fn new(secret: &[u8]) -> Self {
        Self::with_ttls(secret, Duration::minutes(15), Duration::days(7))
    }

    /// Codec with explicit token lifetimes.
    pub fn with_ttls(secret: &[u8], access_ttl: Duration, refresh_ttl: Duration) -> Self {
        Self {
            encoding: EncodingKey::from_secret(secret),
            decoding: DecodingKey::from_secret(secret),
            access_ttl,
            refresh_ttl,
        }
    }

    fn issue(&self, claims: &Claims) -> Result<String, Error> {
        encode(&Header::new(Algorithm::HS256), claims, &self.encoding)
            .map_err(|err| Error::internal(format!("token encoding failed: {err}")))
    }

    fn claims_for(&self, user: &User, kind: TokenKind) -> Claims {
        let now = Utc::now();
        let ttl = match kind {
            TokenKind::Access => self.access_ttl,
            TokenKind::Refresh => self.refresh_ttl,
        };
        Claims {
            sub: user.id().to_string(),
            full_name: user.full_name().to_string(),
            role: user.role(),
            email: user.email().map(str::to_owned),
            is_verified: user.is_verified(),
            token_kind: kind,
            iat: now.timestamp(),
            exp: (now + ttl).timestamp(),
        }
    }

    /// Issue an access/refresh pair for an authenticated user.
    pub fn issue_pair(&self, user: &User) -> Result<TokenPair, Error> {
        Ok(TokenPair {
            access: self.issue(&self.claims_for(user, TokenKind::Access))?,
            refresh: self.issue(&self.claims_for(user, TokenKind::Refresh))?,
        })
    }

    /// Decode and validate a token of the expected kind.
    pub fn decode(&self, token: &str, expected: TokenKind) -> Result<Claims, Error> {
        let data = decode::<Claims>(token, &self.decoding, &Validation::new(Algorithm::HS256))
            .map_err(|_| Error::unauthorized("invalid or expired token"))?;
        if data.claims.token_kind != expected {
            return Err(Error::unauthorized("wrong token kind"));
        }
        Ok(data.claims)
    }

    /// Mint a fresh access token from a valid refresh token.
    ///
    /// Claims are carried over from the refresh token; the store is not
    /// consulted.
    pub fn refresh_access(&self, refresh_token: &str) -> Result<String, Error> {
        let claims = self.decode(refresh_token, TokenKind::Refresh)?;
        let now = Utc::now();
        let access = Claims {
            token_kind: TokenKind::Access,
            iat: now.timestamp(),
            exp: (now + self.access_ttl).timestamp(),
            ..claims
        };
        self.issue(&access)
    }
}

/// Optional authentication context extracted from the `Authorization` header.
///
/// A missing header yields an anonymous context; a present but invalid
/// bearer token fails the request with `401 Unauthorized`.
#[derive(Debug, Clone)]
pub struct AuthContext(Option<Claims>);

impl AuthContext {
    /// Anonymous context, for tests and fixtures.
    pub fn anonymous() -> Self {
        Self(None)
    }

    /// The authenticated claims, if any.
    pub fn claims(&self) -> Option<&Claims> {
        self.0.as_ref()
    }

    /// The acting principal, if authenticated.
    pub fn actor(&self) -> Result<Option<Actor>, Error> {
        self.0.as_ref().map(Claims::actor).transpose()
    }
}

fn extract(req: &HttpRequest) -> Result<AuthContext, Error> {
    let Some(value) = req.headers().get(header::AUTHORIZATION) else {
        return Ok(AuthContext(None));
    };
    let value = value
        .to_str()
        .map_err(|_| Error::unauthorized("malformed authorization header"))?;
    let token = value
        .strip_prefix("Bearer ")
        .ok_or_else(|| Error::unauthorized("authorization scheme must be Bearer"))?;

    let codec = req
        .app_data::<web::Data<JwtCodec>>()
        .ok_or_else(|| Error::internal("token codec not configured"))?;
    let claims = codec.decode(token, TokenKind::Access)?;
    Ok(AuthContext(Some(claims)))
}

impl FromRequest for AuthContext {
    type Error = Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        ready(extract(req))
    }
}
