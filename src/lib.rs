//! Patience Lion: log the money you didn't spend, race your friends for it.
//!
//! A REST API over Postgres. Users log items: positive amounts are purchases
//! they resisted, negative ones are lapses. Rankings, group boards and the
//! hall of fame are aggregations of those items over local day, week and
//! month windows.

pub mod config;
pub mod db;
pub mod routes;
pub mod types;
pub mod utils;
