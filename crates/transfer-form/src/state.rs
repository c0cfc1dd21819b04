//! Form state and slot names.

use action_core::{Event, Tracker};
use serde::{Deserialize, Serialize};

pub const TRANSFER_TYPE: &str = "transfer_type";
pub const AMOUNT: &str = "amount";
pub const NEERO_ID: &str = "neero_id";
pub const PHONE_NUMBER: &str = "phone_number";
pub const CURRENCY: &str = "currency";

/// Slots wiped together once a transaction is confirmed, cancelled or
/// abandoned.
pub const TRANSACTION_SLOTS: [&str; 5] = [AMOUNT, PHONE_NUMBER, NEERO_ID, CURRENCY, TRANSFER_TYPE];

/// How the money leaves the sender.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TransferType {
    /// Wallet-to-wallet transfer to a Neero handle.
    Neero,
    /// Transfer to a mobile money number (MTN, Orange).
    MobileMoney,
}

impl TransferType {
    /// Canonical slot value.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Neero => "neero",
            Self::MobileMoney => "mobile_money",
        }
    }

    /// Parse a canonical slot value. Keywords go through
    /// [`normalize_transfer_type`](crate::normalize_transfer_type) instead.
    pub fn from_slot(value: &str) -> Option<Self> {
        match value {
            "neero" => Some(Self::Neero),
            "mobile_money" => Some(Self::MobileMoney),
            _ => None,
        }
    }

    /// Slot holding the destination for this transfer type.
    pub fn destination_slot(&self) -> &'static str {
        match self {
            Self::Neero => NEERO_ID,
            Self::MobileMoney => PHONE_NUMBER,
        }
    }

    /// Label shown to the user.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Neero => "Neero",
            Self::MobileMoney => "Mobile Money",
        }
    }
}

/// The transaction slots of one conversation.
///
/// Values are kept as the engine stores them: plain strings, absent when
/// unset. `transfer_type` stays a string so that an unexpected value coming
/// from the engine can still be represented and repaired.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FormState {
    pub transfer_type: Option<String>,
    pub amount: Option<String>,
    pub neero_id: Option<String>,
    pub phone_number: Option<String>,
    pub currency: Option<String>,
}

impl FormState {
    /// Create an empty state.
    pub fn new() -> Self {
        Self::default()
    }

    /// Read the transaction slots out of a tracker.
    pub fn from_tracker(tracker: &Tracker) -> Self {
        Self {
            transfer_type: tracker.get_slot(TRANSFER_TYPE),
            amount: tracker.get_slot(AMOUNT),
            neero_id: tracker.get_slot(NEERO_ID),
            phone_number: tracker.get_slot(PHONE_NUMBER),
            currency: tracker.get_slot(CURRENCY),
        }
    }

    /// Builder: set a slot by name. Unknown names are ignored.
    pub fn with(mut self, field: &str, value: impl Into<String>) -> Self {
        self.set(field, Some(value.into()));
        self
    }

    /// Get a slot by name.
    pub fn get(&self, field: &str) -> Option<&str> {
        self.slot(field).and_then(|v| v.as_deref())
    }

    /// Check whether a slot holds a value.
    pub fn has(&self, field: &str) -> bool {
        self.get(field).is_some()
    }

    /// Set or clear a slot by name. Unknown names are ignored.
    pub fn set(&mut self, field: &str, value: Option<String>) {
        if let Some(slot) = self.slot_mut(field) {
            *slot = value;
        }
    }

    /// The transfer type, if set to a canonical value.
    pub fn transfer_type(&self) -> Option<TransferType> {
        self.transfer_type.as_deref().and_then(TransferType::from_slot)
    }

    /// Destination identifier for the current transfer type.
    pub fn destination(&self) -> Option<&str> {
        self.get(self.transfer_type()?.destination_slot())
    }

    /// Check whether no transaction slot is set.
    pub fn is_empty(&self) -> bool {
        TRANSACTION_SLOTS.iter().all(|f| !self.has(f))
    }

    /// Slot events turning `before` into `self`.
    pub fn changes_from(&self, before: &FormState) -> Vec<Event> {
        TRANSACTION_SLOTS
            .iter()
            .filter(|f| self.get(f) != before.get(f))
            .map(|f| match self.get(f) {
                Some(value) => Event::slot_set(*f, value),
                None => Event::slot_cleared(*f),
            })
            .collect()
    }

    /// One slot event per transaction slot, clearing those without a value.
    pub fn slot_events(&self) -> Vec<Event> {
        TRANSACTION_SLOTS
            .iter()
            .map(|f| match self.get(f) {
                Some(value) => Event::slot_set(*f, value),
                None => Event::slot_cleared(*f),
            })
            .collect()
    }

    fn slot(&self, field: &str) -> Option<&Option<String>> {
        match field {
            TRANSFER_TYPE => Some(&self.transfer_type),
            AMOUNT => Some(&self.amount),
            NEERO_ID => Some(&self.neero_id),
            PHONE_NUMBER => Some(&self.phone_number),
            CURRENCY => Some(&self.currency),
            _ => None,
        }
    }

    fn slot_mut(&mut self, field: &str) -> Option<&mut Option<String>> {
        match field {
            TRANSFER_TYPE => Some(&mut self.transfer_type),
            AMOUNT => Some(&mut self.amount),
            NEERO_ID => Some(&mut self.neero_id),
            PHONE_NUMBER => Some(&mut self.phone_number),
            CURRENCY => Some(&mut self.currency),
            _ => None,
        }
    }
}
