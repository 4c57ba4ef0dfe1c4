pub mod interest;
pub mod recurring;
