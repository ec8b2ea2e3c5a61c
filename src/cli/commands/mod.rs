pub mod config;
pub mod db;
pub mod del;
pub mod export;
pub mod history;
pub mod import;
pub mod init;
pub mod log;
pub mod recent;
pub mod register;
pub mod shell;
pub mod types;
