//! # Operator Interface Capability
//!
//! The scan loop and the reconciliation controller never touch a terminal
//! or a window directly. They talk to whatever implements these traits.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Consumer                    Needs                                      │
//! │  ─────────────────────────   ──────────────────────────────────────     │
//! │  Scan loop                   StatusDisplay  ("No barcode detected")     │
//! │  Reconciliation controller   UserInterface  (details, form, "Save?")    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use crate::types::{FieldSpec, FieldValues};

/// Shows one-line status or result text to the operator.
pub trait StatusDisplay {
    fn display(&mut self, text: &str);
}

/// Full request/response surface used by the reconciliation controller.
pub trait UserInterface: StatusDisplay {
    /// Presents a form and returns the submitted values, or `None` when the
    /// operator abandons it.
    fn prompt_fields(&mut self, schema: &[FieldSpec]) -> Option<FieldValues>;

    /// Asks a yes/no question.
    fn confirm(&mut self, prompt: &str) -> bool;
}

impl<T: StatusDisplay + ?Sized> StatusDisplay for &mut T {
    fn display(&mut self, text: &str) {
        (**self).display(text);
    }
}

impl<T: UserInterface + ?Sized> UserInterface for &mut T {
    fn prompt_fields(&mut self, schema: &[FieldSpec]) -> Option<FieldValues> {
        (**self).prompt_fields(schema)
    }

    fn confirm(&mut self, prompt: &str) -> bool {
        (**self).confirm(prompt)
    }
}

/// Discards every status line.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoOpDisplay;

impl StatusDisplay for NoOpDisplay {
    fn display(&mut self, _text: &str) {}
}
