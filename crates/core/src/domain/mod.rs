pub mod bill;
pub mod employee;
