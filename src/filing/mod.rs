//! Submission effect: the hand-off of a finished application to a filing office

mod office;
mod traits;

pub use office::SimulatedFilingOffice;
pub use traits::{SubmissionReceipt, SubmitEffect};

#[cfg(test)]
pub use traits::MockSubmitEffect;
