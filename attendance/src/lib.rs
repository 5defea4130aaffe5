mod app;
pub mod background;
pub mod cli;
pub mod logging;
pub mod session;
pub mod state;
pub mod views;

pub use app::App;
