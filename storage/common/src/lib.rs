pub mod filtering;
pub mod sorting;

pub use filtering::{FilteredStream, ValueSetStream};
pub use sorting::{compare_items, LimitedStream, SortedStream, TopKStream};
