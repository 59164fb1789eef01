pub mod common;
pub mod config;
pub mod token;
pub mod varsel;
pub mod web;
