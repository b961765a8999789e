// src/application/mod.rs
pub mod error;
pub mod services;

pub use services::bookmark_service_impl::BookmarkServiceImpl;
pub use services::tag_service_impl::TagServiceImpl;
