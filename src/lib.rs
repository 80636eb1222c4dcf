pub mod error;
pub mod excel;
pub mod gui;
pub mod logging;
pub mod models;
pub mod parsing;
pub mod settings;
pub mod view;
