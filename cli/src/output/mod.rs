pub mod colorize;
pub mod notify;
