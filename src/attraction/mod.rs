pub mod filter;
pub mod record;

pub use filter::{distinct_values, filter_by_field, sort_by_name};
pub use record::{compare, Attraction, Field};
