pub mod activities;
pub mod admin;
pub mod auth;
pub mod cfos;
pub mod companies;
pub mod contracts;
pub mod me;
pub mod scouts;
pub mod support;
pub mod tags;
pub mod uploads;
