use std::{net::SocketAddr, sync::Arc};

use axum::Router;
use nyxion_core_contact_contracts::ContactFeatureService;
use tokio::net::TcpListener;
use tracing::info;
use url::Url;

mod middlewares;
mod models;
mod routes;

#[derive(Debug, Clone)]
pub struct RestServer<Contact> {
    contact: Contact,
    config: RestServerConfig,
}

#[derive(Debug, Clone)]
pub struct RestServerConfig {
    pub addr: SocketAddr,
    /// Only requests from this origin may use the origin checked contact form.
    pub site_origin: Arc<Url>,
}

impl<Contact> RestServer<Contact>
where
    Contact: ContactFeatureService,
{
    pub fn new(contact: Contact, config: RestServerConfig) -> Self {
        Self { contact, config }
    }

    pub async fn serve(self) -> anyhow::Result<()> {
        let listener = TcpListener::bind(self.config.addr).await?;
        info!("listening on {}", listener.local_addr()?);
        axum::serve(listener, self.router()).await.map_err(Into::into)
    }

    fn router(self) -> Router<()> {
        let router = Router::new().merge(routes::contact::router(
            self.contact.into(),
            self.config.site_origin,
        ));

        let router = middlewares::panic_handler::add(router);
        let router = middlewares::trace::add(router);
        middlewares::request_id::add(router)
    }
}
