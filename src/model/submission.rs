//! Submission record types.
//!
//! A [`Submission`] is one contact-form entry as stored in the backing
//! sheet: identity, contact fields, free-text message, and the timestamp
//! string recorded at submission time.

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use std::fmt;

// ===== RowId =====

/// Identity of a submission: its row number in the backing sheet.
///
/// Row 1 is the header row, so valid ids start at 2. Ids are assigned by
/// the store on fetch and are never reassigned by an edit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RowId(u32);

impl RowId {
    /// Smart constructor: rejects ids below the first data row.
    pub fn new(raw: u32) -> Result<Self, InvalidRowId> {
        if raw < 2 {
            Err(InvalidRowId(raw))
        } else {
            Ok(Self(raw))
        }
    }

    /// The id of the `index`-th data row: index 0 is row 2.
    ///
    /// This is how the store assigns ids on fetch; it cannot produce an
    /// invalid id.
    pub fn from_index(index: usize) -> Self {
        let row = u32::try_from(index).unwrap_or(u32::MAX - 2).saturating_add(2);
        Self(row)
    }

    /// The raw row number.
    pub fn as_u32(self) -> u32 {
        self.0
    }
}

impl fmt::Display for RowId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Rejected row id (below the first data row).
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("Invalid row id {0}: data rows start at 2")]
pub struct InvalidRowId(pub u32);

// ===== Timestamp =====

/// A submission timestamp: the raw string as submitted, plus its parse.
///
/// The raw string participates in free-text search exactly as stored; the
/// parsed value drives sorting and date-range filtering. Parsing never
/// fails construction; an unparseable string simply has no parsed value
/// and is treated as older than every parseable one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Timestamp {
    raw: String,
    parsed: Option<DateTime<Utc>>,
}

impl Timestamp {
    /// Build a timestamp from the raw stored string.
    pub fn new(raw: impl Into<String>) -> Self {
        let raw = raw.into();
        let parsed = parse_timestamp(&raw);
        Self { raw, parsed }
    }

    /// The raw string exactly as submitted.
    pub fn as_str(&self) -> &str {
        &self.raw
    }

    /// The parsed instant, if the raw string is a recognizable date-time.
    pub fn parsed(&self) -> Option<DateTime<Utc>> {
        self.parsed
    }
}

impl fmt::Display for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw)
    }
}

/// Parse the formats the contact form has historically produced.
///
/// RFC 3339 first (what the form writes today), then the naive variants
/// seen in older sheet rows, then a bare date (midnight UTC).
fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();

    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.with_timezone(&Utc));
    }
    for fmt in ["%Y-%m-%dT%H:%M:%S", "%Y-%m-%d %H:%M:%S"] {
        if let Ok(naive) = NaiveDateTime::parse_from_str(raw, fmt) {
            return Some(naive.and_utc());
        }
    }
    if let Ok(date) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        return Some(date.and_hms_opt(0, 0, 0)?.and_utc());
    }

    None
}

// ===== SubmissionPatch =====

/// The four fields an edit replaces wholesale.
///
/// `id` and `timestamp` are never touched by an edit.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SubmissionPatch {
    /// Replacement display name.
    pub name: String,
    /// Replacement email address.
    pub email: String,
    /// Replacement phone number (may be empty).
    pub phone: String,
    /// Replacement message body (may be empty).
    pub message: String,
}

// ===== Submission =====

/// One contact-form submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Submission {
    id: RowId,
    name: String,
    email: String,
    phone: String,
    message: String,
    timestamp: Timestamp,
}

impl Submission {
    /// Create a submission from its stored fields.
    pub fn new(
        id: RowId,
        name: impl Into<String>,
        email: impl Into<String>,
        phone: impl Into<String>,
        message: impl Into<String>,
        timestamp: Timestamp,
    ) -> Self {
        Self {
            id,
            name: name.into(),
            email: email.into(),
            phone: phone.into(),
            message: message.into(),
            timestamp,
        }
    }

    // ===== Accessors (read-only) =====

    /// Row identity in the backing sheet.
    pub fn id(&self) -> RowId {
        self.id
    }

    /// Display name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Email address as submitted (not validated).
    pub fn email(&self) -> &str {
        &self.email
    }

    /// Phone number; empty string when none was provided.
    pub fn phone(&self) -> &str {
        &self.phone
    }

    /// Free-text message; may be empty.
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Submission timestamp.
    pub fn timestamp(&self) -> &Timestamp {
        &self.timestamp
    }

    /// The email domain: everything after the first `@`.
    ///
    /// Returns the empty string when the address has no `@`.
    pub fn email_domain(&self) -> &str {
        match self.email.split_once('@') {
            Some((_, domain)) => domain,
            None => "",
        }
    }

    /// True when a non-blank phone number was provided.
    pub fn has_phone(&self) -> bool {
        !self.phone.trim().is_empty()
    }

    /// Replace the mutable fields from a confirmed edit.
    ///
    /// Identity and timestamp are preserved.
    pub fn apply(&mut self, patch: &SubmissionPatch) {
        self.name = patch.name.clone();
        self.email = patch.email.clone();
        self.phone = patch.phone.clone();
        self.message = patch.message.clone();
    }

    /// The patch that would reproduce this submission's mutable fields.
    pub fn to_patch(&self) -> SubmissionPatch {
        SubmissionPatch {
            name: self.name.clone(),
            email: self.email.clone(),
            phone: self.phone.clone(),
            message: self.message.clone(),
        }
    }
}

// ===== Tests =====
