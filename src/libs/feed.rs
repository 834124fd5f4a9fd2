pub mod rows;
pub mod store;
