use chrono::NaiveDate;
use tracing::info;

use portal_domain::dataset::Dataset;
use portal_domain::id::RequestId;
use portal_domain::request::{Request, RequestItem, RequestStatus};

use crate::error::{PortalError, ValidationError};

/// One editable line of the request modal, still as typed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ItemRow {
    pub name: String,
    pub qty: String,
}

impl Default for ItemRow {
    fn default() -> Self {
        Self {
            name: String::new(),
            qty: "1".into(),
        }
    }
}

/// Leading integer of `raw`, ignoring what follows: `"3x"` is 3, `"x3"` is
/// nothing. Leading whitespace and a sign are accepted; values beyond the
/// `i64` range saturate.
pub fn parse_qty(raw: &str) -> Option<i64> {
    let raw = raw.trim_start();
    let (negative, rest) = match raw.as_bytes().first() {
        Some(b'-') => (true, &raw[1..]),
        Some(b'+') => (false, &raw[1..]),
        _ => (false, raw),
    };
    let digits = rest.bytes().take_while(u8::is_ascii_digit).count();
    if digits == 0 {
        return None;
    }
    let value = rest.as_bytes()[..digits].iter().fold(0i64, |acc, digit| {
        acc.saturating_mul(10).saturating_add(i64::from(digit - b'0'))
    });
    Some(if negative { -value } else { value })
}

/// Keep rows with a name and a positive quantity, in order.
pub fn collect_items(rows: &[ItemRow]) -> Vec<RequestItem> {
    rows.iter()
        .filter_map(|row| {
            let name = row.name.trim();
            let qty = parse_qty(&row.qty).and_then(|qty| u64::try_from(qty).ok())?;
            (!name.is_empty() && qty > 0).then(|| RequestItem {
                name: name.to_owned(),
                qty,
            })
        })
        .collect()
}

// ── SubmitRequest ────────────────────────────────────────────────────────────

pub struct SubmitRequestInput<'a> {
    pub kind: &'a str,
    pub rows: &'a [ItemRow],
    /// Email of the signed-in identity; the request is always theirs.
    pub requester: &'a str,
    pub today: NaiveDate,
}

pub struct SubmitRequestUseCase<'a> {
    pub dataset: &'a mut Dataset,
}

impl SubmitRequestUseCase<'_> {
    pub fn execute(&mut self, input: SubmitRequestInput<'_>) -> Result<RequestId, PortalError> {
        let kind = input.kind.trim();
        if kind.is_empty() {
            return Err(ValidationError::MissingField("type").into());
        }
        let items = collect_items(input.rows);
        if items.is_empty() {
            return Err(ValidationError::NoItems.into());
        }

        let id = RequestId::generate();
        self.dataset.requests.push(Request {
            id: id.clone(),
            kind: kind.to_owned(),
            items,
            status: RequestStatus::Pending,
            date: input.today.into(),
            employee_email: input.requester.to_owned(),
        });
        info!(request_id = %id, "request submitted");
        Ok(id)
    }
}
