pub mod group;
pub mod hall_of_fame;
pub mod item;
pub mod postgres_service;
pub mod ranking;
pub mod user;
pub mod verification;
