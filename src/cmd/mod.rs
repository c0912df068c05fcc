pub mod add;
pub mod context;
pub mod delete;
pub mod list;
pub mod set;
