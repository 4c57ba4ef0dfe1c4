pub mod income_tax;
pub mod slabs;
