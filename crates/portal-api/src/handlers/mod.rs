//! HTTP handlers

pub mod auth;
pub mod health;
pub mod menu;
pub mod navigation;
pub mod preferences;
pub mod users;
