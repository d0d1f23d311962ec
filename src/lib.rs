pub mod accounts;
pub mod app;
pub mod config;
pub mod data;
pub mod error;
pub mod gateway;
pub mod model;
pub mod navigation;
pub mod persistence;
pub mod scoring;
pub mod session;
pub mod timer;
pub mod ui;
pub mod view_models;

pub use app::QuizApp;
