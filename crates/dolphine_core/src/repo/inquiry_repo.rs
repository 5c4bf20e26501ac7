//! Inquiry repository contracts and SQLite implementation.
//!
//! # Invariants
//! - `date` is written once on insert.
//! - Enum columns store the `as_str` spelling of each variant.

use crate::model::inquiry::{
    optional_text, Department, Inquiry, InquiryId, InquiryPatch, InquiryStatus, NewInquiry,
    Priority,
};
use crate::model::now_epoch_ms;
use crate::repo::{ensure_connection_ready, parse_uuid, RepoError, RepoResult};
use rusqlite::{params, Connection, Row};
use std::collections::BTreeMap;
use uuid::Uuid;

const ENTITY: &str = "inquiry";

const INQUIRY_SELECT_SQL: &str = "SELECT
    id,
    name,
    email,
    phone,
    company,
    product,
    message,
    department,
    status,
    priority,
    date,
    last_reply
FROM inquiries";

/// Repository interface for contact-form inquiries.
pub trait InquiryRepository {
    /// Lists inquiries newest first, optionally capped at `limit` rows.
    fn list_inquiries(&self, limit: Option<u32>) -> RepoResult<Vec<Inquiry>>;
    fn get_inquiry(&self, id: InquiryId) -> RepoResult<Option<Inquiry>>;
    fn create_inquiry(&self, draft: &NewInquiry) -> RepoResult<Inquiry>;
    fn update_inquiry(&self, id: InquiryId, patch: &InquiryPatch) -> RepoResult<Inquiry>;
    /// Deletes by id. Returns `false` when nothing was deleted.
    fn delete_inquiry(&self, id: InquiryId) -> RepoResult<bool>;
    /// Row counts per stored status; statuses with no rows are absent.
    fn count_by_status(&self) -> RepoResult<BTreeMap<String, i64>>;
}

/// SQLite-backed inquiry repository.
pub struct SqliteInquiryRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteInquiryRepository<'conn> {
    pub fn try_new(conn: &'conn Connection) -> RepoResult<Self> {
        ensure_connection_ready(conn, &["inquiries"])?;
        Ok(Self { conn })
    }
}

impl InquiryRepository for SqliteInquiryRepository<'_> {
    fn list_inquiries(&self, limit: Option<u32>) -> RepoResult<Vec<Inquiry>> {
        let limit = limit.map_or(-1, i64::from);
        let mut stmt = self.conn.prepare(&format!(
            "{INQUIRY_SELECT_SQL} ORDER BY date DESC, rowid DESC LIMIT ?1;"
        ))?;
        let mut rows = stmt.query([limit])?;
        let mut inquiries = Vec::new();
        while let Some(row) = rows.next()? {
            inquiries.push(parse_inquiry_row(row)?);
        }
        Ok(inquiries)
    }

    fn get_inquiry(&self, id: InquiryId) -> RepoResult<Option<Inquiry>> {
        select_inquiry(self.conn, id)
    }

    fn create_inquiry(&self, draft: &NewInquiry) -> RepoResult<Inquiry> {
        draft.validate()?;

        let inquiry = Inquiry {
            id: Uuid::new_v4(),
            name: draft.name.trim().to_string(),
            email: draft.email.trim().to_string(),
            phone: draft.phone.trim().to_string(),
            company: optional_text(draft.company.clone()),
            product: optional_text(draft.product.clone()),
            message: draft.message.trim().to_string(),
            department: draft.department,
            status: InquiryStatus::default(),
            priority: Priority::default(),
            date: now_epoch_ms(),
            last_reply: None,
        };

        self.conn.execute(
            "INSERT INTO inquiries (
                id,
                name,
                email,
                phone,
                company,
                product,
                message,
                department,
                status,
                priority,
                date,
                last_reply
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12);",
            params![
                inquiry.id.to_string(),
                inquiry.name.as_str(),
                inquiry.email.as_str(),
                inquiry.phone.as_str(),
                inquiry.company.as_deref(),
                inquiry.product.as_deref(),
                inquiry.message.as_str(),
                inquiry.department.as_str(),
                inquiry.status.as_str(),
                inquiry.priority.as_str(),
                inquiry.date,
                inquiry.last_reply,
            ],
        )?;
        Ok(inquiry)
    }

    fn update_inquiry(&self, id: InquiryId, patch: &InquiryPatch) -> RepoResult<Inquiry> {
        let tx = self.conn.unchecked_transaction()?;
        let mut inquiry =
            select_inquiry(&tx, id)?.ok_or(RepoError::NotFound { entity: ENTITY, id })?;
        patch.apply(&mut inquiry);

        tx.execute(
            "UPDATE inquiries
             SET
                department = ?2,
                status = ?3,
                priority = ?4,
                last_reply = ?5
             WHERE id = ?1;",
            params![
                id.to_string(),
                inquiry.department.as_str(),
                inquiry.status.as_str(),
                inquiry.priority.as_str(),
                inquiry.last_reply,
            ],
        )?;
        tx.commit()?;
        Ok(inquiry)
    }

    fn delete_inquiry(&self, id: InquiryId) -> RepoResult<bool> {
        let changed = self
            .conn
            .execute("DELETE FROM inquiries WHERE id = ?1;", [id.to_string()])?;
        Ok(changed > 0)
    }

    fn count_by_status(&self) -> RepoResult<BTreeMap<String, i64>> {
        let mut stmt = self
            .conn
            .prepare("SELECT status, COUNT(*) FROM inquiries GROUP BY status;")?;
        let mut rows = stmt.query([])?;
        let mut counts = BTreeMap::new();
        while let Some(row) = rows.next()? {
            counts.insert(row.get::<_, String>(0)?, row.get::<_, i64>(1)?);
        }
        Ok(counts)
    }
}

fn select_inquiry(conn: &Connection, id: InquiryId) -> RepoResult<Option<Inquiry>> {
    let mut stmt = conn.prepare(&format!("{INQUIRY_SELECT_SQL} WHERE id = ?1;"))?;
    let mut rows = stmt.query([id.to_string()])?;
    if let Some(row) = rows.next()? {
        return Ok(Some(parse_inquiry_row(row)?));
    }
    Ok(None)
}

fn parse_inquiry_row(row: &Row<'_>) -> RepoResult<Inquiry> {
    let id_text: String = row.get("id")?;
    let department: String = row.get("department")?;
    let status: String = row.get("status")?;
    let priority: String = row.get("priority")?;

    Ok(Inquiry {
        id: parse_uuid(&id_text, "inquiries.id")?,
        name: row.get("name")?,
        email: row.get("email")?,
        phone: row.get("phone")?,
        company: row.get("company")?,
        product: row.get("product")?,
        message: row.get("message")?,
        department: Department::parse(&department)
            .map_err(|err| RepoError::InvalidData(format!("inquiries.department: {err}")))?,
        status: InquiryStatus::parse(&status)
            .map_err(|err| RepoError::InvalidData(format!("inquiries.status: {err}")))?,
        priority: Priority::parse(&priority)
            .map_err(|err| RepoError::InvalidData(format!("inquiries.priority: {err}")))?,
        date: row.get("date")?,
        last_reply: row.get("last_reply")?,
    })
}
