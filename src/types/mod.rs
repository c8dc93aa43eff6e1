pub mod error;
pub mod group;
pub mod item;
pub mod mail;
pub mod period;
pub mod ranking;
pub mod response;
pub mod stock;
pub mod token;
pub mod user;
pub mod verification;
