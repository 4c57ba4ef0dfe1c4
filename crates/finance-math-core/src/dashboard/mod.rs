pub mod expenses;
pub mod goals;
