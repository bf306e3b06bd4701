//! Data models for the book API

pub mod book;
pub mod claims;

pub use book::{Book, CreateBook, UpdateBook};
pub use claims::TokenClaims;
