//! Application state wiring configuration, the store client, and the
//! submission workflow together.

use companion_core::messages::{self, Messages};
use companion_core::submission::SubmissionCoordinator;
use companion_infra::config::{load_client_config, resolve_data_dir, with_api_url_override};
use companion_infra::http::HttpCompanionClient;
use companion_types::config::ClientConfig;

use crate::sink::{ConsoleNavigator, ConsoleNotifier};

/// Coordinator pinned to the HTTP store and console sinks.
pub type ConcreteCoordinator =
    SubmissionCoordinator<HttpCompanionClient, ConsoleNotifier, ConsoleNavigator>;

/// Shared application state used by every command.
pub struct AppState {
    pub config: ClientConfig,
    pub client: HttpCompanionClient,
    pub messages: &'static Messages,
}

impl AppState {
    /// Load configuration and build the store client. Performs no network I/O.
    pub async fn init(api_url: Option<String>) -> anyhow::Result<Self> {
        let data_dir = resolve_data_dir();
        let config = with_api_url_override(load_client_config(&data_dir).await, api_url);
        let client = HttpCompanionClient::from_config(&config)?;
        let messages = messages::for_locale(config.locale);

        tracing::debug!(
            api_url = %config.api_url,
            locale = %config.locale,
            data_dir = %data_dir.display(),
            "application state initialized"
        );

        Ok(Self {
            config,
            client,
            messages,
        })
    }

    /// A fresh coordinator for one form. `silent` mutes the console sinks.
    pub fn coordinator(&self, silent: bool) -> ConcreteCoordinator {
        SubmissionCoordinator::new(
            self.client.clone(),
            ConsoleNotifier::new(silent),
            ConsoleNavigator::new(&self.config.api_url, silent),
        )
        .with_messages(self.messages)
        .with_landing_route(self.config.landing_route.clone())
    }
}
