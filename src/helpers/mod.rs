//! Panel helper functions module
//! 
//! Stateless helpers the control panel uses around its tables, server
//! responses and dates.

pub mod dates;
pub mod messages;
pub mod table;

// Re-export main functions
pub use dates::{day_difference, days_since};
pub use messages::{server_error_message, validation_message, ServerError, ValidationIssue};
pub use table::{page_number, PageQuery, PaginationOptions, TableFilterOptions};
