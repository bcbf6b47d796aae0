//! In-memory form state: the draft being edited and its per-field errors.

use std::collections::BTreeMap;

use chrono::Local;
use serde::{Deserialize, Serialize};

use crate::proof::ProofFile;

/// The six user-facing fields of a reimbursement request.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum Field {
    FullName,
    WhatsappNumber,
    Purpose,
    Amount,
    ExpenseDate,
    Proof,
}

impl Field {
    pub fn label(self) -> &'static str {
        match self {
            Field::FullName => "Full name",
            Field::WhatsappNumber => "WhatsApp number",
            Field::Purpose => "Expense purpose",
            Field::Amount => "Reimbursement amount",
            Field::ExpenseDate => "Expense date",
            Field::Proof => "Proof of expense",
        }
    }
}

/// Field-keyed validation messages. At most one entry per field; an entry is
/// cleared individually when the user edits that field and the whole map is
/// replaced by the validator's result at submit time.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldErrors {
    entries: BTreeMap<Field, String>,
}

impl FieldErrors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, field: Field, message: impl Into<String>) {
        self.entries.insert(field, message.into());
    }

    pub fn clear(&mut self, field: Field) {
        self.entries.remove(&field);
    }

    pub fn get(&self, field: Field) -> Option<&str> {
        self.entries.get(&field).map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (Field, &str)> {
        self.entries.iter().map(|(field, message)| (*field, message.as_str()))
    }
}

/// Today's date in the form's `%Y-%m-%d` storage format.
pub fn today_string() -> String {
    Local::now().date_naive().format("%Y-%m-%d").to_string()
}

/// The request being edited. Values are stored raw: the amount as a plain
/// digit string (separators stripped on input), the date as `%Y-%m-%d`.
#[derive(Debug, Clone, PartialEq)]
pub struct ReimbursementDraft {
    pub full_name: String,
    pub whatsapp_number: String,
    pub purpose: String,
    pub amount_raw: String,
    pub expense_date: String,
    pub proof: Option<ProofFile>,
}

impl ReimbursementDraft {
    /// Fresh defaults: empty fields, no proof, expense date preset to today.
    pub fn with_today() -> Self {
        Self::with_date(today_string())
    }

    pub fn with_date(expense_date: String) -> Self {
        Self {
            full_name: String::new(),
            whatsapp_number: String::new(),
            purpose: String::new(),
            amount_raw: String::new(),
            expense_date,
            proof: None,
        }
    }

    pub fn attach_proof(&mut self, file: ProofFile) {
        self.proof = Some(file);
    }

    pub fn clear_proof(&mut self) {
        self.proof = None;
    }
}
