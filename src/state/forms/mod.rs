//! Form domain layer
//!
//! Maps each wizard page onto focusable slots and buffers text edits until
//! they are committed to the store.

mod field;
mod form_state;

pub use field::FormField;
pub use form_state::{
    slots_for, toggle_applicant_kind, ApplicantField, Commit, DateField, FieldSlot, FocusRing,
    InventionField, TextTarget,
};
