//! CSV export of the current view.
//!
//! Pure formatting over the sorted (not paginated) collection. The format
//! matches what the admin dashboard has always produced: a fixed header,
//! raw name/email/phone/timestamp fields, and a message field that is
//! always double-quoted with `""` escaping (it is the only field users
//! put commas and quotes into).

use crate::model::Submission;
use std::io::Write;
use std::path::Path;

/// The header row, in column order.
pub const CSV_HEADER: &str = "Name,Email,Phone,Message,Timestamp";

/// Render submissions to CSV text, one row per submission.
pub fn to_csv(rows: &[Submission]) -> String {
    let mut out = String::from(CSV_HEADER);
    for row in rows {
        out.push('\n');
        out.push_str(row.name());
        out.push(',');
        out.push_str(row.email());
        out.push(',');
        out.push_str(row.phone());
        out.push(',');
        out.push('"');
        out.push_str(&row.message().replace('"', "\"\""));
        out.push('"');
        out.push(',');
        out.push_str(row.timestamp().as_str());
    }
    out.push('\n');
    out
}

/// Render and write submissions to a file.
pub fn write_csv(rows: &[Submission], path: &Path) -> std::io::Result<()> {
    let mut file = std::fs::File::create(path)?;
    file.write_all(to_csv(rows).as_bytes())
}

// ===== Tests =====
