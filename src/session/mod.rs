pub mod controller;
pub mod logsink;
pub mod state;

pub use controller::SessionController;
pub use state::*;
