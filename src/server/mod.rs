pub mod api;
pub mod error;
pub mod upload;

use log::info;
use std::error::Error;
use std::net::SocketAddr;
use api::AppState;

pub struct Server {
    addr: SocketAddr,
    state: AppState,
}

impl Server {
    pub fn new(addr: SocketAddr, state: AppState) -> Self {
        Self { addr, state }
    }

    pub async fn run(&self) -> Result<(), Box<dyn Error + Send + Sync>> {
        let app = api::router(self.state.clone());

        info!("Starting HTTP API server on: http://{}", self.addr);
        let listener = tokio::net::TcpListener
            ::bind(self.addr).await
            .map_err(|e| {
                format!("Failed to bind HTTP server to {}: {}. Try a different port.", self.addr, e)
            })?;

        axum::serve(listener, app.into_make_service()).await?;
        Ok(())
    }
}
