//! Route handlers, one module per resource
//!
//! Handlers only unpack the request and call a service; all rules live in
//! `dreams-service`.

pub mod auth;
pub mod channels;
pub mod dms;
pub mod health;
pub mod messages;
pub mod standups;
pub mod users;
