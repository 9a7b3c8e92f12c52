mod config;
mod game;
mod net;
mod state;

use net::dispatcher::DispatcherHandle;
use net::ws::WsServer;
use state::hub::Hub;

fn main() {
    env_logger::init();

    let addr = std::env::args()
        .nth(1)
        .unwrap_or_else(|| config::DEFAULT_LISTEN_ADDR.to_owned());

    let hub = Hub::new();
    let dispatcher = DispatcherHandle::new(hub);

    let rt = tokio::runtime::Runtime::new().expect("tokio runtime");
    if let Err(err) = rt.block_on(WsServer::serve(&addr, dispatcher)) {
        log::error!("server stopped: {}", err);
    }
}
