//! Error types for form validation.
//!
//! The `Display` text of the validation errors is what the user sees when a
//! value is rejected, so it is written for them.

use thiserror::Error;

/// Rejected amount.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AmountError {
    #[error("Le montant doit être un nombre entier, par exemple 5000.")]
    NotANumber,

    #[error("Le montant doit être supérieur à 0.")]
    NotPositive,

    #[error("Le montant ne peut pas dépasser {ceiling} FCFA.")]
    AboveCeiling { ceiling: u64 },
}

/// Rejected Neero handle.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum NeeroIdError {
    #[error(
        "L'identifiant Neero doit commencer par @ et contenir 3 à 20 caractères \
         (lettres, chiffres ou _), par exemple @jean_237."
    )]
    InvalidFormat,
}

/// Rejected phone number.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PhoneNumberError {
    #[error(
        "Le numéro doit être un numéro mobile camerounais de 9 chiffres \
         commençant par 6, par exemple 655443322."
    )]
    InvalidFormat,
}

/// Transfer type that matched no keyword.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TransferTypeError {
    #[error("Je n'ai pas compris le type de transfert. Choisissez Neero ou Mobile Money.")]
    Unrecognized,
}

/// Form-level errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FormError {
    /// The form cannot be submitted while slots are missing.
    #[error("form incomplete, missing: {}", .0.join(", "))]
    Incomplete(Vec<&'static str>),
}

/// Invalid configuration value.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{name} must be a positive integer, got '{value}'")]
    InvalidValue { name: &'static str, value: String },
}
