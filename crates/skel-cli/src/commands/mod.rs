pub mod check;
pub mod list;
pub mod new;
pub mod remove;
pub mod save;
pub mod tokens;
pub mod use_;
