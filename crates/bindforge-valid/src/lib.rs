pub mod rules;
pub mod validator;

// Re-exports
pub use validator::{check, validate};
