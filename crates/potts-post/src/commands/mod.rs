pub mod analyze;
pub mod batch;
pub mod command;
pub mod inspect;
