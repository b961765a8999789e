// src/domain/mod.rs
pub mod bookmark;
pub mod clock;
pub mod draft;
pub mod error;
pub mod repositories;
pub mod tag;
