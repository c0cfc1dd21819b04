//! Field validation and normalization.

use std::num::IntErrorKind;
use std::sync::LazyLock;

use regex::Regex;

use crate::error::{AmountError, NeeroIdError, PhoneNumberError, TransferTypeError};
use crate::state::TransferType;
use crate::tables::{match_keywords, TRANSFER_TYPE_KEYWORDS};

static NEERO_ID_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^@[A-Za-z0-9_]{3,20}$").expect("valid neero id regex"));

// Optional country code, then a 9-digit mobile number starting with 6.
static PHONE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(?:\+237|237)?(6[0-9]{8})$").expect("valid phone regex"));

/// Validate an amount.
///
/// Spaces and thousands-separator commas are stripped before parsing, so
/// `"1 000 000"` and `"1,000,000"` are both read as one million. The result
/// must be a whole number in `1..=ceiling`.
pub fn validate_amount(raw: &str, ceiling: u64) -> Result<u64, AmountError> {
    let cleaned: String = raw.chars().filter(|c| !c.is_whitespace() && *c != ',').collect();

    let value = match cleaned.parse::<i64>() {
        Ok(value) => value,
        Err(e) if matches!(e.kind(), IntErrorKind::PosOverflow) => {
            return Err(AmountError::AboveCeiling { ceiling });
        }
        Err(e) if matches!(e.kind(), IntErrorKind::NegOverflow) => {
            return Err(AmountError::NotPositive);
        }
        Err(_) => return Err(AmountError::NotANumber),
    };

    if value <= 0 {
        return Err(AmountError::NotPositive);
    }

    let value = value as u64;
    if value > ceiling {
        return Err(AmountError::AboveCeiling { ceiling });
    }

    Ok(value)
}

/// Validate a Neero handle, adding the leading `@` when missing.
pub fn validate_neero_id(raw: &str) -> Result<String, NeeroIdError> {
    let trimmed = raw.trim();
    let handle = if trimmed.starts_with('@') {
        trimmed.to_string()
    } else {
        format!("@{}", trimmed)
    };

    if NEERO_ID_RE.is_match(&handle) {
        Ok(handle)
    } else {
        Err(NeeroIdError::InvalidFormat)
    }
}

/// Validate a Cameroonian mobile number and return its 9 local digits.
///
/// Spaces and hyphens are ignored; a `+237` or `237` prefix is stripped.
pub fn validate_phone_number(raw: &str) -> Result<String, PhoneNumberError> {
    let cleaned: String = raw.chars().filter(|c| !c.is_whitespace() && *c != '-').collect();

    PHONE_RE
        .captures(&cleaned)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().to_string())
        .ok_or(PhoneNumberError::InvalidFormat)
}

/// Normalize a transfer type keyword ("momo", "Wallet Neero", ...).
pub fn normalize_transfer_type(raw: &str) -> Result<TransferType, TransferTypeError> {
    if let Some(canonical) = TransferType::from_slot(raw.trim()) {
        return Ok(canonical);
    }
    match_keywords(TRANSFER_TYPE_KEYWORDS, raw).ok_or(TransferTypeError::Unrecognized)
}
