pub mod a001_order;
pub mod common;
