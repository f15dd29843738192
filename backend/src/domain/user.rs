//! User identity model.
//!
//! The full name is the login key. Contact fields are optional but unique
//! when present; the Aadhaar number doubles as the claim checked by the
//! verification gate.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Validation errors raised by the user value types.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UserValidationError {
    EmptyFullName,
    FullNameTooLong { max: usize },
    InvalidEmail,
    InvalidAadhaarLength,
    InvalidAadhaarDigits,
    UnknownRole { value: String },
}

impl fmt::Display for UserValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyFullName => write!(f, "full name must not be empty"),
            Self::FullNameTooLong { max } => {
                write!(f, "full name must be at most {max} characters")
            }
            Self::InvalidEmail => write!(f, "email must contain a mailbox and domain"),
            Self::InvalidAadhaarLength => write!(f, "aadhaar number must be exactly 12 digits"),
            Self::InvalidAadhaarDigits => {
                write!(f, "aadhaar number must contain only ASCII digits")
            }
            Self::UnknownRole { value } => {
                write!(f, "role must be citizen or district_leader, got {value:?}")
            }
        }
    }
}

impl std::error::Error for UserValidationError {}

/// Closed set of roles recognised by the authorisation gate.
///
/// New roles are added as new variants so the gate keeps exhaustiveness
/// checking; there is no open string growth path.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    #[default]
    Citizen,
    DistrictLeader,
}

impl Role {
    /// Wire value used in tokens and JSON bodies.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Citizen => "citizen",
            Self::DistrictLeader => "district_leader",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Role {
    type Err = UserValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "citizen" => Ok(Self::Citizen),
            "district_leader" => Ok(Self::DistrictLeader),
            other => Err(UserValidationError::UnknownRole {
                value: other.to_owned(),
            }),
        }
    }
}

/// Maximum allowed length of a full name.
pub const FULL_NAME_MAX: usize = 100;

/// Unique human-readable full name used as the login key.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct FullName(String);

impl FullName {
    /// Validate and construct a [`FullName`].
    pub fn new(value: impl Into<String>) -> Result<Self, UserValidationError> {
        let value = value.into();
        let trimmed = value.trim();
        if trimmed.is_empty() {
            return Err(UserValidationError::EmptyFullName);
        }
        if trimmed.chars().count() > FULL_NAME_MAX {
            return Err(UserValidationError::FullNameTooLong { max: FULL_NAME_MAX });
        }
        Ok(Self(trimmed.to_owned()))
    }
}

impl AsRef<str> for FullName {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for FullName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_ref())
    }
}

impl From<FullName> for String {
    fn from(value: FullName) -> Self {
        value.0
    }
}

impl TryFrom<String> for FullName {
    type Error = UserValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

/// National identity number: exactly 12 ASCII digits.
///
/// Structural validity is checked here so malformed input is rejected before
/// any store lookup is attempted.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct AadhaarNumber(String);

/// Required length of an Aadhaar number.
pub const AADHAAR_LEN: usize = 12;

impl AadhaarNumber {
    /// Validate and construct an [`AadhaarNumber`].
    pub fn new(value: impl Into<String>) -> Result<Self, UserValidationError> {
        let value = value.into();
        if value.len() != AADHAAR_LEN {
            return Err(UserValidationError::InvalidAadhaarLength);
        }
        if !value.bytes().all(|b| b.is_ascii_digit()) {
            return Err(UserValidationError::InvalidAadhaarDigits);
        }
        Ok(Self(value))
    }
}

impl AsRef<str> for AadhaarNumber {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for AadhaarNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_ref())
    }
}

impl From<AadhaarNumber> for String {
    fn from(value: AadhaarNumber) -> Self {
        value.0
    }
}

impl TryFrom<String> for AadhaarNumber {
    type Error = UserValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

/// Validate an optional email address.
///
/// The check is deliberately shallow: a mailbox, an `@`, and a domain.
pub fn validate_email(value: &str) -> Result<(), UserValidationError> {
    let mut parts = value.splitn(2, '@');
    let mailbox = parts.next().unwrap_or_default();
    let domain = parts.next().unwrap_or_default();
    if mailbox.is_empty() || domain.is_empty() || !domain.contains('.') {
        return Err(UserValidationError::InvalidEmail);
    }
    Ok(())
}

/// Registered user record.
///
/// ## Invariants
/// - `password_hash` is a one-way argon2id hash; the raw password is never
///   stored and the hash never serialised.
/// - `is_verified` starts false and only the verification gate sets it true;
///   no operation resets it.
#[derive(Debug, Clone, PartialEq)]
pub struct User {
    id: i64,
    full_name: FullName,
    email: Option<String>,
    phone: Option<String>,
    aadhaar_number: Option<AadhaarNumber>,
    role: Role,
    is_verified: bool,
    password_hash: String,
    created_at: DateTime<Utc>,
}

/// Constructor fields for [`User`], assembled by the persistence adapter.
#[derive(Debug, Clone)]
pub struct UserRecord {
    pub id: i64,
    pub full_name: FullName,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub aadhaar_number: Option<AadhaarNumber>,
    pub role: Role,
    pub is_verified: bool,
    pub password_hash: String,
    pub created_at: DateTime<Utc>,
}

impl User {
    /// Build a user from persisted fields.
    pub fn from_record(record: UserRecord) -> Self {
        let UserRecord {
            id,
            full_name,
            email,
            phone,
            aadhaar_number,
            role,
            is_verified,
            password_hash,
            created_at,
        } = record;
        Self {
            id,
            full_name,
            email,
            phone,
            aadhaar_number,
            role,
            is_verified,
            password_hash,
            created_at,
        }
    }

    /// Sequential identifier assigned by the store.
    pub fn id(&self) -> i64 {
        self.id
    }

    /// Login key.
    pub fn full_name(&self) -> &FullName {
        &self.full_name
    }

    /// Optional unique email.
    pub fn email(&self) -> Option<&str> {
        self.email.as_deref()
    }

    /// Optional unique phone number.
    pub fn phone(&self) -> Option<&str> {
        self.phone.as_deref()
    }

    /// Optional unique national-id number.
    pub fn aadhaar_number(&self) -> Option<&AadhaarNumber> {
        self.aadhaar_number.as_ref()
    }

    /// Role fixed at registration.
    pub fn role(&self) -> Role {
        self.role
    }

    /// Whether the verification gate has confirmed this identity.
    pub fn is_verified(&self) -> bool {
        self.is_verified
    }

    /// Stored argon2id hash, consumed only by the credential check.
    pub fn password_hash(&self) -> &str {
        self.password_hash.as_str()
    }

    /// Registration timestamp.
    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }
}

/// Fields required to persist a new user.
#[derive(Debug, Clone)]
pub struct NewUser {
    pub full_name: FullName,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub aadhaar_number: Option<AadhaarNumber>,
    pub role: Role,
    pub password_hash: String,
}

/// Acting principal derived from a verified credential.
///
/// The role travels with the token, mirroring how the issued claims embed it;
/// authorisation gates match on it exhaustively.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Actor {
    pub user_id: i64,
    pub role: Role,
}

impl Actor {
    /// Construct an actor for the given user.
    pub fn new(user_id: i64, role: Role) -> Self {
        Self { user_id, role }
    }
}
