//! Terminal user interface: Elm-style app state, views, and theming.

pub mod app;
pub mod events;
pub mod layout;
pub mod services;
pub mod theme;
pub mod views;
pub mod widgets;
