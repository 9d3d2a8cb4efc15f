pub mod app_state;
pub mod commands;
pub mod logging;
pub mod repl;
pub mod scenario;
pub mod sim_host;

pub use app_state::AppState;
pub use sim_host::SimHost;
