//! Domain core: entities, value types, services, and hexagon ports.
//!
//! Types here are transport agnostic. Inbound adapters parse wire payloads
//! into these types; outbound adapters persist them.

pub mod announcement;
pub mod announcement_service;
pub mod error;
pub mod identity_service;
pub mod ports;
pub mod report;
pub mod report_service;
pub mod user;

pub use self::announcement::{Announcement, NewAnnouncement, Priority};
pub use self::announcement_service::AnnouncementService;
pub use self::error::{Error, ErrorCode};
pub use self::identity_service::IdentityService;
pub use self::report::{
    Category, Coordinates, NewReport, Report, ReportDraft, ReportPatch, ReportStatus,
    ReportValidationError,
};
pub use self::report_service::ReportService;
pub use self::user::{
    validate_email, AadhaarNumber, Actor, FullName, NewUser, Role, User, UserValidationError,
};

/// Convenient result alias for fallible domain and handler operations.
pub type ApiResult<T> = Result<T, Error>;
