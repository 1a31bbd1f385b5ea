pub mod add;
pub mod list;
pub mod model;
pub mod remove;
pub mod use_;
