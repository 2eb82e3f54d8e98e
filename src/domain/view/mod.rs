pub mod filter;
pub mod markers;
pub mod pagination;
pub mod sort;
