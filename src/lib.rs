#![doc = "The `duetrack` library crate."]
#![doc = ""]
#![doc = "Domain models, cookie-session authentication, the task store with its"]
#![doc = "eager overdue-recompute pass, routing configuration, and error handling"]
#![doc = "for the duetrack to-do list service. The binary (`main.rs`) wires these"]
#![doc = "modules into a running server."]

pub mod auth;
pub mod config;
pub mod db;
pub mod due;
pub mod error;
pub mod flash;
pub mod models;
pub mod routes;
pub mod tasks;
