pub mod board;
pub mod select_user;
