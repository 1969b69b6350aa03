//! StateManager actor implementation

use std::path::Path;
use std::sync::Arc;

use tokio::sync::mpsc;
use tracing::{debug, info};
use tripstore::{Collection, FileKv, KeyValueStore, MemoryKv};

use super::messages::{StateCommand, StateError, StateResponse};
use crate::domain::Itinerary;

/// Handle to send commands to the StateManager
#[derive(Clone)]
pub struct StateManager {
    tx: mpsc::Sender<StateCommand>,
}

impl StateManager {
    /// Spawn an actor that owns the given collection
    ///
    /// Must be called from within a tokio runtime.
    pub fn spawn(collection: Collection<Itinerary>) -> Self {
        debug!(key = %collection.key(), "spawn: called");
        let (tx, rx) = mpsc::channel(256);

        tokio::spawn(actor_loop(collection, rx));

        info!("StateManager spawned");
        Self { tx }
    }

    /// Spawn over a directory-backed store
    pub fn spawn_file(dir: impl AsRef<Path>, key: &str) -> eyre::Result<Self> {
        debug!(dir = %dir.as_ref().display(), %key, "spawn_file: called");
        let kv: Arc<dyn KeyValueStore> = Arc::new(FileKv::open(dir)?);
        Ok(Self::spawn(Collection::new(kv, key)))
    }

    /// Spawn over an in-process store that is discarded on exit
    pub fn spawn_memory(key: &str) -> Self {
        debug!(%key, "spawn_memory: called");
        let kv: Arc<dyn KeyValueStore> = Arc::new(MemoryKv::new());
        Self::spawn(Collection::new(kv, key))
    }

    /// Insert or replace an itinerary by id
    pub async fn save(&self, itinerary: Itinerary) -> StateResponse<()> {
        debug!(id = %itinerary.id, "save: called");
        let (reply_tx, reply_rx) = tokio::sync::oneshot::channel();
        self.tx
            .send(StateCommand::SaveItinerary {
                itinerary,
                reply: reply_tx,
            })
            .await
            .map_err(|_| StateError::ChannelError)?;
        reply_rx.await.map_err(|_| StateError::ChannelError)?
    }

    /// Get an itinerary by id
    pub async fn get(&self, id: &str) -> StateResponse<Option<Itinerary>> {
        debug!(%id, "get: called");
        let (reply_tx, reply_rx) = tokio::sync::oneshot::channel();
        self.tx
            .send(StateCommand::GetItinerary {
                id: id.to_string(),
                reply: reply_tx,
            })
            .await
            .map_err(|_| StateError::ChannelError)?;
        reply_rx.await.map_err(|_| StateError::ChannelError)?
    }

    /// Get an itinerary by id, failing if it does not exist
    pub async fn get_required(&self, id: &str) -> StateResponse<Itinerary> {
        self.get(id).await?.ok_or_else(|| StateError::NotFound(id.to_string()))
    }

    /// All saved itineraries in insertion order
    pub async fn list(&self) -> StateResponse<Vec<Itinerary>> {
        debug!("list: called");
        let (reply_tx, reply_rx) = tokio::sync::oneshot::channel();
        self.tx
            .send(StateCommand::ListItineraries { reply: reply_tx })
            .await
            .map_err(|_| StateError::ChannelError)?;
        reply_rx.await.map_err(|_| StateError::ChannelError)?
    }

    /// Delete by id; unknown ids are a no-op
    pub async fn delete(&self, id: &str) -> StateResponse<()> {
        debug!(%id, "delete: called");
        let (reply_tx, reply_rx) = tokio::sync::oneshot::channel();
        self.tx
            .send(StateCommand::DeleteItinerary {
                id: id.to_string(),
                reply: reply_tx,
            })
            .await
            .map_err(|_| StateError::ChannelError)?;
        reply_rx.await.map_err(|_| StateError::ChannelError)?
    }

    /// Shutdown the StateManager
    pub async fn shutdown(&self) -> Result<(), StateError> {
        debug!("shutdown: called");
        self.tx
            .send(StateCommand::Shutdown)
            .await
            .map_err(|_| StateError::ChannelError)
    }
}

/// The actor loop that owns the collection and processes commands
async fn actor_loop(collection: Collection<Itinerary>, mut rx: mpsc::Receiver<StateCommand>) {
    debug!("StateManager actor started");

    while let Some(cmd) = rx.recv().await {
        match cmd {
            StateCommand::SaveItinerary { itinerary, reply } => {
                debug!(id = %itinerary.id, "actor_loop: SaveItinerary command");
                let id = itinerary.id.clone();
                let result = collection
                    .save(itinerary)
                    .map_err(|e| StateError::StoreError(format!("{:#}", e)));
                if result.is_ok() {
                    info!(%id, "Saved itinerary");
                }
                let _ = reply.send(result);
            }

            StateCommand::GetItinerary { id, reply } => {
                debug!(%id, "actor_loop: GetItinerary command");
                let _ = reply.send(Ok(collection.get_by_id(&id)));
            }

            StateCommand::ListItineraries { reply } => {
                debug!("actor_loop: ListItineraries command");
                let _ = reply.send(Ok(collection.list()));
            }

            StateCommand::DeleteItinerary { id, reply } => {
                debug!(%id, "actor_loop: DeleteItinerary command");
                let result = collection
                    .delete_by_id(&id)
                    .map_err(|e| StateError::StoreError(format!("{:#}", e)));
                let _ = reply.send(result);
            }

            StateCommand::Shutdown => {
                debug!("actor_loop: Shutdown command");
                info!("StateManager shutting down");
                break;
            }
        }
    }

    debug!("StateManager actor stopped");
}
