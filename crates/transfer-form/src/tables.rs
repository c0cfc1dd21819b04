//! Static lookup tables for intent filtering and keyword normalization.
//!
//! Kept as data so they can be reviewed and localized without touching the
//! resolver logic.

use crate::state::TransferType;

/// Intents that never feed the transfer form.
///
/// While the form is collecting, a turn classified as one of these leaves
/// the form state untouched.
pub static NON_FORM_INTENTS: &[&str] = &[
    "greet",
    "goodbye",
    "cancel",
    "help",
    "nlu_fallback",
    "out_of_scope",
    "bot_challenge",
    "restart",
    "thank_you",
    "ask_user_info",
];

/// Keywords accepted for an explicit transfer type, checked group by group.
///
/// Matching is case-insensitive on substrings; the first group with a hit
/// wins.
pub static TRANSFER_TYPE_KEYWORDS: &[(TransferType, &[&str])] = &[
    (TransferType::Neero, &["neero", "wallet", "wallet neero"]),
    (
        TransferType::MobileMoney,
        &[
            "mobile money",
            "mobile",
            "momo",
            "orange money",
            "mtn momo",
            "mtn",
            "orange",
            "om",
        ],
    ),
];

/// Keywords scanned in free text when no entity gave the transfer type away.
pub static FREE_TEXT_KEYWORDS: &[(TransferType, &[&str])] = &[
    (TransferType::Neero, &["neero", "wallet"]),
    (TransferType::MobileMoney, &["mobile", "momo", "orange", "mtn"]),
];

/// Check whether an intent is excluded from form processing.
pub fn is_non_form_intent(intent: &str) -> bool {
    NON_FORM_INTENTS.contains(&intent)
}

/// Find the first keyword group with a substring hit in `text`.
pub fn match_keywords(table: &[(TransferType, &[&str])], text: &str) -> Option<TransferType> {
    let lowered = text.to_lowercase();
    table
        .iter()
        .find(|(_, keywords)| keywords.iter().any(|k| lowered.contains(k)))
        .map(|(transfer_type, _)| *transfer_type)
}
