pub mod future_value;
