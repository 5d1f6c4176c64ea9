pub mod catalog;
pub mod config;
pub mod constants;
pub mod domain;
pub mod error;
pub mod ledger;
pub mod logging;
pub mod scheduler;
pub mod selection;
pub mod shell;
pub mod store;
