pub mod names;
pub mod ownership;
pub mod resolve;
