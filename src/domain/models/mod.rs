pub mod auth;
pub mod event;
pub mod notification;
pub mod registration;
pub mod society;
pub mod user;
