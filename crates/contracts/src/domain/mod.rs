pub mod a001_employee;
pub mod a002_reference_list;
pub mod common;
