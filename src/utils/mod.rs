pub mod mail;
pub mod stocks;
pub mod token;
pub mod webutils;
