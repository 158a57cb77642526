pub mod app;
pub mod components;
pub mod context;
pub mod input;
pub mod search;
pub mod state;
pub mod tui;

/// What the view asks the app to do after consuming a key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Quit,
    None,
}
