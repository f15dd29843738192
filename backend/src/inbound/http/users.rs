//! Identity API handlers.
//!
//! ```text
//! POST /api/user/register {"full_name":"Asha Rao","password":"s3cret"}
//! POST /api/token {"full_name":"Asha Rao","password":"s3cret"}
//! POST /api/token/refresh {"refresh":"<jwt>"}
//! POST /api/user/verify-aadhaar {"aadhaar_number":"123456789012","otp":"123456"}
//! ```

use actix_web::{post, web, HttpResponse};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::ports::RegistrationRequest;
use crate::domain::user::{AadhaarNumber, FullName, Role, User};
use crate::domain::Error;
use crate::inbound::http::auth::{JwtCodec, TokenPair};
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::field_error;
use crate::inbound::http::ApiResult;

/// Registration body for `POST /api/user/register`.
#[derive(Debug, Deserialize, Serialize, utoipa::ToSchema)]
pub struct RegisterRequest {
    pub full_name: String,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub aadhaar_number: Option<String>,
    #[serde(default)]
    pub role: Option<Role>,
    pub password: String,
}

/// User representation returned by the API; never carries the password hash.
#[derive(Debug, Serialize, Deserialize, utoipa::ToSchema)]
pub struct UserResponse {
    pub id: i64,
    pub full_name: String,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub aadhaar_number: Option<String>,
    pub role: Role,
    pub is_verified: bool,
    pub created_at: DateTime<Utc>,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id(),
            full_name: user.full_name().to_string(),
            email: user.email().map(str::to_owned),
            phone: user.phone().map(str::to_owned),
            aadhaar_number: user.aadhaar_number().map(ToString::to_string),
            role: user.role(),
            is_verified: user.is_verified(),
            created_at: user.created_at(),
        }
    }
}

fn parse_full_name(value: &str) -> Result<FullName, Error> {
    FullName::new(value).map_err(|err| field_error("full_name", err.to_string()))
}

fn parse_aadhaar(value: &str) -> Result<AadhaarNumber, Error> {
    AadhaarNumber::new(value).map_err(|err| field_error("aadhaar_number", err.to_string()))
}

/// Register a new user account.
#[utoipa::path(
    post,
    path = "/api/user/register",
    request_body = RegisterRequest,
    responses(
        (status = 201, description = "User created", body = UserResponse),
        (status = 400, description = "Invalid request", body = Error),
        (status = 409, description = "Duplicate identity field", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["users"],
    operation_id = "registerUser"
)]
#[post("/user/register")]
pub async fn register(
    state: web::Data<HttpState>,
    payload: web::Json<RegisterRequest>,
) -> ApiResult<HttpResponse> {
    let payload = payload.into_inner();
    let full_name = parse_full_name(&payload.full_name)?;
    let aadhaar_number = payload
        .aadhaar_number
        .as_deref()
        .map(parse_aadhaar)
        .transpose()?;

    let user = state
        .identity
        .register(RegistrationRequest {
            full_name,
            email: payload.email,
            phone: payload.phone,
            aadhaar_number,
            role: payload.role.unwrap_or_default(),
            password: payload.password,
        })
        .await?;
    Ok(HttpResponse::Created().json(UserResponse::from(user)))
}

/// Credential body for `POST /api/token`.
#[derive(Debug, Deserialize, Serialize, utoipa::ToSchema)]
pub struct TokenRequest {
    pub full_name: String,
    pub password: String,
}

/// Exchange credentials for an access/refresh token pair.
#[utoipa::path(
    post,
    path = "/api/token",
    request_body = TokenRequest,
    responses(
        (status = 200, description = "Token pair", body = TokenPair),
        (status = 400, description = "Invalid request", body = Error),
        (status = 401, description = "Invalid credentials", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["users"],
    operation_id = "issueTokens",
    security([])
)]
#[post("/token")]
pub async fn issue_tokens(
    state: web::Data<HttpState>,
    codec: web::Data<JwtCodec>,
    payload: web::Json<TokenRequest>,
) -> ApiResult<web::Json<TokenPair>> {
    let payload = payload.into_inner();
    let full_name = parse_full_name(&payload.full_name)?;
    let user = state
        .identity
        .authenticate(&full_name, &payload.password)
        .await?;
    Ok(web::Json(codec.issue_pair(&user)?))
}

/// Refresh body for `POST /api/token/refresh`.
#[derive(Debug, Deserialize, Serialize, utoipa::ToSchema)]
pub struct RefreshRequest {
    pub refresh: String,
}

/// Fresh access token minted from a refresh token.
#[derive(Debug, Serialize, Deserialize, utoipa::ToSchema)]
pub struct AccessResponse {
    pub access: String,
}

/// Mint a new access token from a refresh token.
#[utoipa::path(
    post,
    path = "/api/token/refresh",
    request_body = RefreshRequest,
    responses(
        (status = 200, description = "New access token", body = AccessResponse),
        (status = 401, description = "Invalid refresh token", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["users"],
    operation_id = "refreshToken",
    security([])
)]
#[post("/token/refresh")]
pub async fn refresh_token(
    codec: web::Data<JwtCodec>,
    payload: web::Json<RefreshRequest>,
) -> ApiResult<web::Json<AccessResponse>> {
    let access = codec.refresh_access(&payload.refresh)?;
    Ok(web::Json(AccessResponse { access }))
}

/// Verification body for `POST /api/user/verify-aadhaar`.
#[derive(Debug, Deserialize, Serialize, utoipa::ToSchema)]
pub struct VerifyAadhaarRequest {
    pub aadhaar_number: String,
    pub otp: String,
}

/// Verify an Aadhaar claim with a one-time code and flip the verified flag.
///
/// Structural validation of the number and the proof check both happen
/// before any account lookup, so malformed or wrongly-proved requests
/// cannot probe for account existence.
#[utoipa::path(
    post,
    path = "/api/user/verify-aadhaar",
    request_body = VerifyAadhaarRequest,
    responses(
        (status = 200, description = "User verified", body = UserResponse),
        (status = 400, description = "Malformed number or wrong code", body = Error),
        (status = 404, description = "No user with this Aadhaar", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["users"],
    operation_id = "verifyAadhaar"
)]
#[post("/user/verify-aadhaar")]
pub async fn verify_aadhaar(
    state: web::Data<HttpState>,
    payload: web::Json<VerifyAadhaarRequest>,
) -> ApiResult<web::Json<UserResponse>> {
    let payload = payload.into_inner();
    let aadhaar = parse_aadhaar(&payload.aadhaar_number)?;
    let user = state.identity.verify_identity(&aadhaar, &payload.otp).await?;
    Ok(web::Json(UserResponse::from(user)))
}
