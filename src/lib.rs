pub mod admin;
pub mod app;
pub mod applications;
pub mod auth;
pub mod company;
pub mod config;
pub mod cookies;
pub mod db;
pub mod drives;
pub mod error;
pub mod flash;
pub mod state;
pub mod student;
pub mod views;
