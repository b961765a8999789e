pub mod di;
pub mod repositories;
