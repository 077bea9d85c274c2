pub mod employee;
pub mod learning;
pub mod performance;
