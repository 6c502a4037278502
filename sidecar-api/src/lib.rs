pub mod cli;
pub mod reload;
pub mod routes;
pub mod state;

pub use cli::Args;
pub use routes::create_app;
pub use state::AppState;
