pub mod inventory;
pub mod load;
pub mod parse;
pub mod summary;
