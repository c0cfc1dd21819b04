//! Built-in actions.

mod ask_affirmation;
mod ask_transfer_type;
mod clear_transaction_slots;
mod get_user_info;
mod restart;
mod submit_transfer;
mod validate_transfer_form;

pub use ask_affirmation::{AskAffirmation, INTENT_LABELS};
pub use ask_transfer_type::AskTransferType;
pub use clear_transaction_slots::ClearTransactionSlots;
pub use get_user_info::{GetUserInfo, USER_ID_SLOT};
pub use restart::Restart;
pub use submit_transfer::SubmitTransfer;
pub use validate_transfer_form::{ValidateTransferForm, REQUESTED_SLOT, TRANSFER_FORM};
