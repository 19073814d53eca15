pub mod app;
pub mod auth;
pub mod events;
pub mod footer;
pub mod form;
pub mod google;
pub mod header;
pub mod input;
pub mod landing;
pub mod layout;
pub mod lists;
pub mod loadable;
pub mod mvi;
pub mod render;
pub mod route;
pub mod runtime;
pub mod screen;
pub mod terminal_guard;
pub mod theme;
pub mod words;
