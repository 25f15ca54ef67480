pub mod cart;
pub mod domain;
pub mod error;
pub mod formatting;
pub mod protocol;
