//! Application state module

mod forms;
mod model;
mod steps;
mod store;
mod submission;
mod validation;

pub use forms::*;
pub use model::*;
pub use steps::*;
pub use store::*;
pub use submission::*;
pub use validation::*;
