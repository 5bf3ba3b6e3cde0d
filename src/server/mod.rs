mod http_layers;
mod rankings;
#[allow(clippy::module_inception)]
mod server;
mod state;

pub use http_layers::RequestsLoggingLevel;
pub use server::{make_app, run_server, ServerConfig};
pub use state::ServerState;
