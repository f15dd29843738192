//! In-process store backing every repository port.
//!
//! All durable state lives behind one `RwLock`, so a patch is applied under a
//! single write guard: whole-field-set atomicity, last-writer-wins across
//! concurrent leaders. User deletion clears owner references on reports
//! (SET NULL) inside the same guard, keeping the weak-reference contract.

use std::collections::BTreeMap;
use std::sync::RwLock;

use async_trait::async_trait;
use chrono::Utc;

use crate::domain::announcement::{Announcement, NewAnnouncement, Priority};
use crate::domain::ports::{
    AnnouncementRepository, AnnouncementRepositoryError, ReportRepository, ReportRepositoryError,
    UserRepository, UserRepositoryError,
};
use crate::domain::report::{NewReport, Report, ReportPatch, ReportRecord};
use crate::domain::user::{AadhaarNumber, FullName, NewUser, User, UserRecord};

#[derive(Debug, Clone)]
struct AnnouncementRow {
    id: i64,
    title: String,
    description: String,
    priority: Priority,
    date: chrono::DateTime<Utc>,
}

#[derive(Debug, Default)]
struct Tables {
    users: BTreeMap<i64, UserRecord>,
    reports: BTreeMap<i64, ReportRecord>,
    announcements: Vec<AnnouncementRow>,
    next_user_id: i64,
    next_report_id: i64,
    next_announcement_id: i64,
}

impl Tables {
    fn next_user_id(&mut self) -> i64 {
        self.next_user_id += 1;
        self.next_user_id
    }

    fn next_report_id(&mut self) -> i64 {
        self.next_report_id += 1;
        self.next_report_id
    }

    fn next_announcement_id(&mut self) -> i64 {
        self.next_announcement_id += 1;
        self.next_announcement_id
    }
}

/// Shared in-memory store implementing every repository port.
#[derive(Debug, Default)]
pub struct InMemoryStore {
    tables: RwLock<Tables>,
}

impl InMemoryStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    fn read(&self) -> Result<std::sync::RwLockReadGuard<'_, Tables>, String> {
        self.tables
            .read()
            .map_err(|_| "store lock poisoned".to_owned())
    }

    fn write(&self) -> Result<std::sync::RwLockWriteGuard<'_, Tables>, String> {
        self.tables
            .write()
            .map_err(|_| "store lock poisoned".to_owned())
    }
}

fn duplicate_field(tables: &Tables, user: &NewUser) -> Option<&'static str> {
    for existing in tables.users.values() {
        if existing.full_name == user.full_name {
            return Some("full_name");
        }
        if let (Some(a), Some(b)) = (existing.email.as_deref(), user.email.as_deref()) {
            if a.eq_ignore_ascii_case(b) {
                return Some("email");
            }
        }
        if let (Some(a), Some(b)) = (existing.phone.as_deref(), user.phone.as_deref()) {
            if a == b {
                return Some("phone");
            }
        }
        if let (Some(a), Some(b)) = (
            existing.aadhaar_number.as_ref(),
            user.aadhaar_number.as_ref(),
        ) {
            if a == b {
                return Some("aadhaar_number");
            }
        }
    }
    None
}

#[async_trait]
impl UserRepository for InMemoryStore {
    async fn insert(&self, user: NewUser) -> Result<User, UserRepositoryError> {
        let mut tables = self.write().map_err(UserRepositoryError::query)?;
        if let Some(field) = duplicate_field(&tables, &user) {
            return Err(UserRepositoryError::duplicate(field));
        }
        let id = tables.next_user_id();
        let record = UserRecord {
            id,
            full_name: user.full_name,
            email: user.email,
            phone: user.phone,
            aadhaar_number: user.aadhaar_number,
            role: user.role,
            is_verified: false,
            password_hash: user.password_hash,
            created_at: Utc::now(),
        };
        tables.users.insert(id, record.clone());
        Ok(User::from_record(record))
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<User>, UserRepositoryError> {
        let tables = self.read().map_err(UserRepositoryError::query)?;
        Ok(tables.users.get(&id).cloned().map(User::from_record))
    }

    async fn find_by_full_name(
        &self,
        full_name: &FullName,
    ) -> Result<Option<User>, UserRepositoryError> {
        let tables = self.read().map_err(UserRepositoryError::query)?;
        Ok(tables
            .users
            .values()
            .find(|record| &record.full_name == full_name)
            .cloned()
            .map(User::from_record))
    }

    async fn find_by_aadhaar(
        &self,
        aadhaar: &AadhaarNumber,
    ) -> Result<Option<User>, UserRepositoryError> {
        let tables = self.read().map_err(UserRepositoryError::query)?;
        Ok(tables
            .users
            .values()
            .find(|record| record.aadhaar_number.as_ref() == Some(aadhaar))
            .cloned()
            .map(User::from_record))
    }

    async fn mark_verified(&self, id: i64) -> Result<Option<User>, UserRepositoryError> {
        let mut tables = self.write().map_err(UserRepositoryError::query)?;
        let Some(record) = tables.users.get_mut(&id) else {
            return Ok(None);
        };
        record.is_verified = true;
        Ok(Some(User::from_record(record.clone())))
    }

    async fn delete(&self, id: i64) -> Result<bool, UserRepositoryError> {
        let mut tables = self.write().map_err(UserRepositoryError::query)?;
        let removed = tables.users.remove(&id).is_some();
        if removed {
            // SET NULL on the weak reference; reports survive their owner.
            for report in tables.reports.values_mut() {
                if report.owner == Some(id) {
                    report.owner = None;
                }
            }
        }
        Ok(removed)
    }
}

#[async_trait]
impl ReportRepository for InMemoryStore {
    async fn insert(&self, report: NewReport) -> Result<Report, ReportRepositoryError> {
        let mut tables = self.write().map_err(ReportRepositoryError::query)?;
        let id = tables.next_report_id();
        let record = ReportRecord {
            id,
            owner: report.owner,
            category: report.category,
            description: report.description,
            coordinates: report.coordinates,
            address: report.address,
            image: report.image,
            status: report.status,
            created_at: Utc::now(),
        };
        tables.reports.insert(id, record.clone());
        Ok(Report::from_record(record))
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<Report>, ReportRepositoryError> {
        let tables = self.read().map_err(ReportRepositoryError::query)?;
        Ok(tables.reports.get(&id).cloned().map(Report::from_record))
    }

    async fn apply_patch(
        &self,
        id: i64,
        patch: ReportPatch,
    ) -> Result<Option<Report>, ReportRepositoryError> {
        let mut tables = self.write().map_err(ReportRepositoryError::query)?;
        let Some(record) = tables.reports.get(&id) else {
            return Ok(None);
        };
        // Stage on a copy so a rejected field leaves the stored record intact.
        let mut staged = record.clone();
        if let Some(category) = patch.category {
            staged.category = category;
        }
        if let Some(description) = patch.description {
            staged.description = description;
        }
        if let Some(latitude) = patch.latitude {
            staged.coordinates = crate::domain::Coordinates::new(
                latitude,
                staged.coordinates.longitude(),
            )
            .map_err(|err| ReportRepositoryError::query(err.to_string()))?;
        }
        if let Some(longitude) = patch.longitude {
            staged.coordinates = crate::domain::Coordinates::new(
                staged.coordinates.latitude(),
                longitude,
            )
            .map_err(|err| ReportRepositoryError::query(err.to_string()))?;
        }
        if let Some(address) = patch.address {
            staged.address = Some(address);
        }
        if let Some(image) = patch.image {
            staged.image = Some(image);
        }
        if let Some(status) = patch.status {
            staged.status = status;
        }
        tables.reports.insert(id, staged.clone());
        Ok(Some(Report::from_record(staged)))
    }

    async fn list(&self) -> Result<Vec<Report>, ReportRepositoryError> {
        let tables = self.read().map_err(ReportRepositoryError::query)?;
        let mut records: Vec<ReportRecord> = tables.reports.values().cloned().collect();
        records.sort_by(|a, b| {
            b.created_at
                .cmp(&a.created_at)
                .then_with(|| b.id.cmp(&a.id))
        });
        Ok(records.into_iter().map(Report::from_record).collect())
    }

    async fn delete(&self, id: i64) -> Result<bool, ReportRepositoryError> {
        let mut tables = self.write().map_err(ReportRepositoryError::query)?;
        Ok(tables.reports.remove(&id).is_some())
    }
}

#[async_trait]
impl AnnouncementRepository for InMemoryStore {
    async fn insert(
        &self,
        announcement: NewAnnouncement,
    ) -> Result<Announcement, AnnouncementRepositoryError> {
        let mut tables = self.write().map_err(AnnouncementRepositoryError::query)?;
        let id = tables.next_announcement_id();
        let row = AnnouncementRow {
            id,
            title: announcement.title,
            description: announcement.description,
            priority: announcement.priority,
            date: Utc::now(),
        };
        tables.announcements.push(row.clone());
        Ok(Announcement::from_record(
            row.id,
            row.title,
            row.description,
            row.priority,
            row.date,
        ))
    }

    async fn list(&self) -> Result<Vec<Announcement>, AnnouncementRepositoryError> {
        let tables = self.read().map_err(AnnouncementRepositoryError::query)?;
        let mut rows = tables.announcements.clone();
        rows.sort_by(|a, b| b.date.cmp(&a.date).then_with(|| b.id.cmp(&a.id)));
        Ok(rows
            .into_iter()
            .map(|row| {
                Announcement::from_record(row.id, row.title, row.description, row.priority, row.date)
            })
            .collect())
    }
}
