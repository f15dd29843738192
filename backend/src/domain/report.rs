//! Report aggregate: the entity carrying the triage lifecycle.
//!
//! A report is created `pending` regardless of client input and moves through
//! the status grid only via the lifecycle service's gated update.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Validation errors raised by report value types.
#[derive(Debug, Clone, PartialEq)]
pub enum ReportValidationError {
    EmptyDescription,
    LatitudeOutOfRange { value: f64 },
    LongitudeOutOfRange { value: f64 },
    NonFiniteCoordinate,
    UnknownCategory { value: String },
    UnknownStatus { value: String },
}

impl fmt::Display for ReportValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyDescription => write!(f, "description must not be empty"),
            Self::LatitudeOutOfRange { value } => {
                write!(f, "latitude must be within [-90, 90], got {value}")
            }
            Self::LongitudeOutOfRange { value } => {
                write!(f, "longitude must be within [-180, 180], got {value}")
            }
            Self::NonFiniteCoordinate => write!(f, "coordinates must be finite numbers"),
            Self::UnknownCategory { value } => write!(
                f,
                "category must be one of land_and_revenue, law_and_order, \
                 basic_services_infra, other; got {value:?}"
            ),
            Self::UnknownStatus { value } => write!(
                f,
                "status must be one of pending, in_progress, resolved, rejected; got {value:?}"
            ),
        }
    }
}

impl std::error::Error for ReportValidationError {}

/// Complaint category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    LandAndRevenue,
    LawAndOrder,
    BasicServicesInfra,
    Other,
}

impl Category {
    /// Wire value used in JSON bodies.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::LandAndRevenue => "land_and_revenue",
            Self::LawAndOrder => "law_and_order",
            Self::BasicServicesInfra => "basic_services_infra",
            Self::Other => "other",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Category {
    type Err = ReportValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "land_and_revenue" => Ok(Self::LandAndRevenue),
            "law_and_order" => Ok(Self::LawAndOrder),
            "basic_services_infra" => Ok(Self::BasicServicesInfra),
            "other" => Ok(Self::Other),
            other => Err(ReportValidationError::UnknownCategory {
                value: other.to_owned(),
            }),
        }
    }
}

/// Triage status.
///
/// `Pending` is the only initial state. The transition graph is the full 4x4
/// grid; none of the states is terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum ReportStatus {
    Pending,
    InProgress,
    Resolved,
    Rejected,
}

impl ReportStatus {
    /// Every status value, in declaration order.
    pub const ALL: [ReportStatus; 4] = [
        Self::Pending,
        Self::InProgress,
        Self::Resolved,
        Self::Rejected,
    ];

    /// Wire value used in JSON bodies.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::InProgress => "in_progress",
            Self::Resolved => "resolved",
            Self::Rejected => "rejected",
        }
    }
}

impl fmt::Display for ReportStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for ReportStatus {
    type Err = ReportValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(Self::Pending),
            "in_progress" => Ok(Self::InProgress),
            "resolved" => Ok(Self::Resolved),
            "rejected" => Ok(Self::Rejected),
            other => Err(ReportValidationError::UnknownStatus {
                value: other.to_owned(),
            }),
        }
    }
}

/// Validated decimal coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Coordinates {
    latitude: f64,
    longitude: f64,
}

/// Validate a latitude value in decimal degrees.
pub fn validate_latitude(value: f64) -> Result<f64, ReportValidationError> {
    if !value.is_finite() {
        return Err(ReportValidationError::NonFiniteCoordinate);
    }
    if !(-90.0..=90.0).contains(&value) {
        return Err(ReportValidationError::LatitudeOutOfRange { value });
    }
    Ok(value)
}

/// Validate a longitude value in decimal degrees.
pub fn validate_longitude(value: f64) -> Result<f64, ReportValidationError> {
    if !value.is_finite() {
        return Err(ReportValidationError::NonFiniteCoordinate);
    }
    if !(-180.0..=180.0).contains(&value) {
        return Err(ReportValidationError::LongitudeOutOfRange { value });
    }
    Ok(value)
}

impl Coordinates {
    /// Validate and construct coordinates.
    pub fn new(latitude: f64, longitude: f64) -> Result<Self, ReportValidationError> {
        Ok(Self {
            latitude: validate_latitude(latitude)?,
            longitude: validate_longitude(longitude)?,
        })
    }

    /// Latitude in decimal degrees.
    pub fn latitude(&self) -> f64 {
        self.latitude
    }

    /// Longitude in decimal degrees.
    pub fn longitude(&self) -> f64 {
        self.longitude
    }
}

/// Persisted report.
///
/// ## Invariants
/// - `status` always holds one of the four enum values.
/// - `created_at` is set once and is the sole listing sort key (descending).
/// - `owner` is a weak reference: deleting the referenced user clears it
///   instead of cascading; a report with no owner is a stable, valid state.
#[derive(Debug, Clone, PartialEq)]
pub struct Report {
    id: i64,
    owner: Option<i64>,
    category: Category,
    description: String,
    coordinates: Coordinates,
    address: Option<String>,
    image: Option<String>,
    status: ReportStatus,
    created_at: DateTime<Utc>,
}

/// Constructor fields for [`Report`], assembled by the persistence adapter.
#[derive(Debug, Clone)]
pub struct ReportRecord {
    pub id: i64,
    pub owner: Option<i64>,
    pub category: Category,
    pub description: String,
    pub coordinates: Coordinates,
    pub address: Option<String>,
    pub image: Option<String>,
    pub status: ReportStatus,
    pub created_at: DateTime<Utc>,
}

impl Report {
    /// Build a report from persisted fields.
    pub fn from_record(record: ReportRecord) -> Self {
        let ReportRecord {
            id,
            owner,
            category,
            description,
            coordinates,
            address,
            image,
            status,
            created_at,
        } = record;
        Self {
            id,
            owner,
            category,
            description,
            coordinates,
            address,
            image,
            status,
            created_at,
        }
    }

    /// Sequential identifier assigned by the store.
    pub fn id(&self) -> i64 {
        self.id
    }

    /// Weak reference to the submitting user, absent for anonymous reports
    /// and after the owner is deleted.
    pub fn owner(&self) -> Option<i64> {
        self.owner
    }

    /// Complaint category.
    pub fn category(&self) -> Category {
        self.category
    }

    /// Free-text complaint description.
    pub fn description(&self) -> &str {
        self.description.as_str()
    }

    /// Geotag of the reported issue.
    pub fn coordinates(&self) -> Coordinates {
        self.coordinates
    }

    /// Optional free-text address.
    pub fn address(&self) -> Option<&str> {
        self.address.as_deref()
    }

    /// Optional reference to an externally stored photo asset.
    pub fn image(&self) -> Option<&str> {
        self.image.as_deref()
    }

    /// Current triage status.
    pub fn status(&self) -> ReportStatus {
        self.status
    }

    /// Submission timestamp, immutable after creation.
    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }
}

/// Client-supplied fields for a new report, before lifecycle validation.
///
/// A status value is deliberately absent: creation forces `pending`.
#[derive(Debug, Clone)]
pub struct ReportDraft {
    pub category: Category,
    pub description: String,
    pub latitude: f64,
    pub longitude: f64,
    pub address: Option<String>,
    pub image: Option<String>,
}

/// Validated fields handed to the repository for insertion.
#[derive(Debug, Clone)]
pub struct NewReport {
    pub owner: Option<i64>,
    pub category: Category,
    pub description: String,
    pub coordinates: Coordinates,
    pub address: Option<String>,
    pub image: Option<String>,
    pub status: ReportStatus,
}

/// Partial update applied atomically: either every supplied field is written
/// or none is.
#[derive(Debug, Clone, Default)]
pub struct ReportPatch {
    pub category: Option<Category>,
    pub description: Option<String>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub address: Option<String>,
    pub image: Option<String>,
    pub status: Option<ReportStatus>,
}

impl ReportPatch {
    /// Whether the patch touches the role-gated status field.
    pub fn touches_status(&self) -> bool {
        self.status.is_some()
    }

    /// Whether the patch supplies no fields at all.
    pub fn is_empty(&self) -> bool {
        self.category.is_none()
            && self.description.is_none()
            && self.latitude.is_none()
            && self.longitude.is_none()
            && self.address.is_none()
            && self.image.is_none()
            && self.status.is_none()
    }
}
