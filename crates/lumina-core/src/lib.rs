pub mod catalog;
pub mod chat;
pub mod config;
pub mod content;
pub mod contributions;
pub mod grid;
pub mod layout;
pub mod markup;
pub mod platform;
pub mod spotlight;
pub mod tile;
