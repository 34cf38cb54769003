//! Coercion of raw field tuples into typed records.
//!
//! Amount fields arrive as whatever the model transcribed: thousands
//! separators, currency glyphs, "Dr"/"Cr" markers, or outright junk. A bad
//! token degrades to 0.0 at the field boundary; it must never abort the
//! record, let alone the batch.

use crate::schema::{TransactionRecord, WaybillRecord};

/// Currency glyphs stripped before the numeric parse.
const CURRENCY_GLYPHS: [char; 5] = ['₦', '$', '£', '€', '₹'];

/// Directional markers banks append to amounts.
const DIRECTION_MARKERS: [&str; 2] = ["DR", "CR"];

/// Coerce a noisy monetary token into a float.
///
/// Empty or null-like input returns 0.0 without attempting a parse, and any
/// residual string that still fails to parse also returns 0.0.
pub fn clean_money(raw: &str) -> f64 {
    let mut s: String = raw
        .trim()
        .chars()
        .filter(|c| *c != ',' && !CURRENCY_GLYPHS.contains(c))
        .collect();

    for marker in DIRECTION_MARKERS {
        let upper = s.to_ascii_uppercase();
        if let Some(stripped) = upper.strip_suffix(marker) {
            s.truncate(stripped.len());
        } else if upper.starts_with(marker) {
            s.drain(..marker.len());
        }
    }

    let s = s.trim();
    if s.is_empty() || s.eq_ignore_ascii_case("null") || s == "-" {
        return 0.0;
    }

    s.parse::<f64>().unwrap_or(0.0)
}

/// Map a five-field tuple (bank statement schema order) to a typed record.
///
/// The parser guarantees exactly `date, description, credit, debit, balance`
/// positions; textual fields pass through trimmed and unvalidated.
pub fn normalize_record(fields: &[String]) -> TransactionRecord {
    TransactionRecord {
        date: field(fields, 0),
        description: field(fields, 1),
        credit: clean_money(&field(fields, 2)),
        debit: clean_money(&field(fields, 3)),
        balance: clean_money(&field(fields, 4)),
    }
}

/// Map a four-field tuple (waybill schema order) to a typed record.
pub fn normalize_waybill(fields: &[String]) -> WaybillRecord {
    WaybillRecord {
        date: field(fields, 0),
        waybill_number: field(fields, 1),
        vendor: field(fields, 2),
        amount: clean_money(&field(fields, 3)),
    }
}

fn field(fields: &[String], idx: usize) -> String {
    fields.get(idx).map(|f| f.trim().to_string()).unwrap_or_default()
}
