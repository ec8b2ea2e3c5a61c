pub mod calendar;
pub mod del;
pub mod log;
pub mod register;
pub mod seed;
pub mod transfer;
pub mod types;
