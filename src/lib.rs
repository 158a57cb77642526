pub mod audio;
pub mod event;
pub mod http;
pub mod model;
pub mod server;
pub mod ui;
pub mod util;
