//! Form validation core for the course-platform admin console.
//!
//! Pure logic only: rule vocabulary, the validation aggregator that drives
//! the violations panel, and the rule sets of the admin forms.

pub mod error;
pub mod forms;
pub mod types;
pub mod validation;
