//! Form rendering module
//!
//! - `field_renderer`: text field boxes
//! - `page`: one wizard page as a scrolling column of controls

mod field_renderer;
mod page;

pub use page::draw_page;
