pub mod errors;
pub mod db;
pub mod validation;
pub mod employee;
