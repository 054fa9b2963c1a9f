// src/lib.rs
pub mod app;
pub mod catalog_api;
pub mod dates;
pub mod errors;
pub mod event;
pub mod genres;
pub mod podcast;
pub mod ui;

pub mod widgets;
