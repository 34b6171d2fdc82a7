//! Network actor - runs REST calls in the Tokio runtime

use tokio::sync::mpsc;
use tokio::task::JoinSet;

use crate::messages::{NetworkCommand, NetworkResponse};
use crate::network::client::{execute, BooksClient};

/// Network actor that executes book commands, one task per call.
///
/// Calls are never cancelled once started; on shutdown the remaining
/// tasks are dropped with the JoinSet.
pub struct NetworkActor {
    client: BooksClient,
    response_tx: mpsc::UnboundedSender<NetworkResponse>,
    active_requests: JoinSet<()>,
}

impl NetworkActor {
    pub fn new(client: BooksClient, response_tx: mpsc::UnboundedSender<NetworkResponse>) -> Self {
        NetworkActor {
            client,
            response_tx,
            active_requests: JoinSet::new(),
        }
    }

    /// Run the network actor message loop
    pub async fn run(mut self, mut cmd_rx: mpsc::UnboundedReceiver<NetworkCommand>) {
        loop {
            tokio::select! {
                biased;

                cmd = cmd_rx.recv() => {
                    match cmd {
                        Some(NetworkCommand::Shutdown) | None => {
                            tracing::info!(in_flight = self.active_requests.len(), "Network actor shutting down");
                            break;
                        }
                        Some(cmd) => self.spawn(cmd),
                    }
                }

                // Reap completed tasks
                Some(result) = self.active_requests.join_next() => {
                    if let Err(e) = result {
                        tracing::error!(error = %e, "Request task failed");
                    }
                }
            }
        }
    }

    fn spawn(&mut self, cmd: NetworkCommand) {
        let client = self.client.clone();
        let response_tx = self.response_tx.clone();

        self.active_requests.spawn(async move {
            tracing::info!(?cmd, "Executing request");
            if let Some(response) = execute(&client, cmd).await {
                tracing::info!(id = response.id(), op = response.operation().as_str(), "Request completed");
                let _ = response_tx.send(response);
            }
        });
    }
}
