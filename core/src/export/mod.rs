pub mod receipt;
pub mod table;
