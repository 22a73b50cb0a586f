//! HTTP handlers for the gate's browser and JSON surface.

pub mod health;
pub mod home;
pub mod login;
pub mod logout;
pub mod protected;
pub mod register;
