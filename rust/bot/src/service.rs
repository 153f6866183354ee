use std::sync::{Arc, Mutex};
use std::time::Duration;
use thiserror::Error;
use tokio::sync::oneshot;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tracing::{debug, info, warn};

use fateweaver_engine::cards::Catalog;
use fateweaver_engine::errors::CatalogError;
use fateweaver_engine::registry::Registry;

use crate::commands::{self, Command, CommandContext, Reply};
use crate::config::BotConfig;
use crate::errors::CommandError;
use crate::storage::{JsonStore, StorageError};

#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("failed to load card catalog: {0}")]
    Catalog(#[from] CatalogError),
    #[error("failed to persist registry: {0}")]
    Storage(#[from] StorageError),
    #[error("registry lock poisoned")]
    StoragePoisoned,
}

/// Owner of the shared game state: the immutable catalog, the mutable
/// registry behind one mutex, and the snapshot store.
///
/// Every command takes the registry lock only for its synchronous state
/// transition; snapshot serialization and file writes happen outside it, so
/// slow I/O never blocks play.
#[derive(Debug, Clone)]
pub struct Fateweaver {
    catalog: Arc<Catalog>,
    registry: Arc<Mutex<Registry>>,
    store: Arc<JsonStore>,
    save_interval: Duration,
}

impl Fateweaver {
    /// Build the service from configuration: load the catalog once, then
    /// restore the registry from the snapshot store, falling back to an
    /// empty registry when there is nothing usable to load.
    pub fn from_config(config: &BotConfig) -> Result<Self, ServiceError> {
        let catalog = Catalog::load(&config.catalog_path)?;
        let store = JsonStore::new(&config.data_path);
        Ok(Self::new(
            catalog,
            store,
            Duration::from_secs(config.save_interval_secs),
        ))
    }

    pub fn new(catalog: Catalog, store: JsonStore, save_interval: Duration) -> Self {
        let registry = load_registry(&store, catalog.len());
        Self {
            catalog: Arc::new(catalog),
            registry: Arc::new(Mutex::new(registry)),
            store: Arc::new(store),
            save_interval,
        }
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    /// Run one validated command to completion. Commands touching the same
    /// guild never interleave their read-modify-write: the registry mutex is
    /// the single serialization point.
    pub fn execute(&self, ctx: &CommandContext, command: Command) -> Result<Reply, CommandError> {
        debug!(
            guild_id = ctx.guild_id,
            user_id = ctx.user_id,
            command = ?command,
            "dispatching command"
        );
        let mut registry = self
            .registry
            .lock()
            .map_err(|_| CommandError::State("registry lock poisoned".into()))?;
        commands::handle(&mut registry, &self.catalog, ctx, command)
    }

    /// Snapshot the registry under the lock, then write it to the store.
    pub fn flush(&self) -> Result<(), ServiceError> {
        let snapshot = {
            let registry = self
                .registry
                .lock()
                .map_err(|_| ServiceError::StoragePoisoned)?;
            registry.snapshot()
        };
        self.store.save(&snapshot)?;
        Ok(())
    }

    /// Start the periodic persistence task. The returned handle stops the
    /// task and performs a final flush.
    pub fn start(&self) -> ServiceHandle {
        let (shutdown_tx, mut shutdown_rx) = oneshot::channel::<()>();
        let service = self.clone();
        let period = self.save_interval;

        info!(interval_secs = period.as_secs(), "starting persistence task");
        let task = tokio::spawn(async move {
            let mut ticker = tokio::time::interval(period);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
            // The first tick fires immediately; consume it so the loop waits
            // a full period before the first write.
            ticker.tick().await;
            loop {
                tokio::select! {
                    _ = &mut shutdown_rx => break,
                    _ = ticker.tick() => {
                        match service.flush() {
                            Ok(()) => debug!("registry snapshot saved"),
                            // Best effort: keep the state in memory and retry
                            // on the next cycle.
                            Err(err) => warn!(error = %err, "periodic save failed"),
                        }
                    }
                }
            }
        });

        ServiceHandle {
            service: self.clone(),
            shutdown_tx,
            task,
        }
    }
}

/// Handle to a running persistence task.
pub struct ServiceHandle {
    service: Fateweaver,
    shutdown_tx: oneshot::Sender<()>,
    task: JoinHandle<()>,
}

impl ServiceHandle {
    /// Stop the periodic task and write a final snapshot.
    pub async fn stop(self) -> Result<(), ServiceError> {
        let _ = self.shutdown_tx.send(());
        if let Err(err) = self.task.await {
            warn!(error = %err, "persistence task ended abnormally");
        }
        info!("persistence task stopped; writing final snapshot");
        self.service.flush()
    }
}

fn load_registry(store: &JsonStore, card_count: usize) -> Registry {
    match store.load() {
        Ok(snapshot) => match Registry::from_snapshot(&snapshot, card_count) {
            Ok(registry) => {
                info!(
                    guilds = registry.guild_count(),
                    "registry restored from snapshot"
                );
                registry
            }
            Err(err) => {
                warn!(error = %err, "snapshot violates pile invariants; starting empty");
                Registry::new(card_count)
            }
        },
        Err(err) => {
            info!(error = %err, "no usable snapshot; starting empty");
            Registry::new(card_count)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    use fateweaver_engine::cards::Card;

    fn card(id: u32, name: &str, keywords: &[&str]) -> Card {
        Card {
            id,
            number: id.to_string(),
            name: name.to_string(),
            keywords: keywords.iter().map(|k| k.to_string()).collect(),
            description: String::new(),
            image: String::new(),
        }
    }

    fn catalog() -> Catalog {
        Catalog::from_cards(vec![
            card(0, "The Fool", &["fool"]),
            card(1, "The Magician", &["magician"]),
            card(2, "High Priestess", &["priestess"]),
        ])
    }

    fn ctx() -> CommandContext {
        CommandContext {
            guild_id: 100,
            user_id: 1,
            member_ids: vec![1],
        }
    }

    #[tokio::test]
    async fn stop_flushes_state_to_disk() {
        let dir = tempdir().unwrap();
        let store = JsonStore::new(dir.path().join("fateweaver.json"));
        let service = Fateweaver::new(catalog(), store.clone(), Duration::from_secs(3600));

        let handle = service.start();
        service
            .execute(&ctx(), Command::Draw { count: 1 })
            .expect("draw succeeds");
        handle.stop().await.expect("stop flushes");

        let snapshot = store.load().expect("snapshot exists after stop");
        let player = &snapshot.guilds[&100].players[&1];
        assert_eq!(player.hand.len(), 1);
        assert_eq!(player.deck.len(), 2);
    }

    #[tokio::test]
    async fn periodic_task_flushes_without_commands() {
        let dir = tempdir().unwrap();
        let store = JsonStore::new(dir.path().join("fateweaver.json"));
        let service = Fateweaver::new(catalog(), store.clone(), Duration::from_millis(20));

        let handle = service.start();
        tokio::time::sleep(Duration::from_millis(120)).await;
        assert!(store.load().is_ok(), "periodic task wrote a snapshot");
        handle.stop().await.expect("stop");
    }

    #[tokio::test]
    async fn restart_restores_previous_state() {
        let dir = tempdir().unwrap();
        let store = JsonStore::new(dir.path().join("fateweaver.json"));

        {
            let service = Fateweaver::new(catalog(), store.clone(), Duration::from_secs(3600));
            service
                .execute(&ctx(), Command::Draw { count: 2 })
                .expect("draw");
            service.flush().expect("flush");
        }

        let service = Fateweaver::new(catalog(), store, Duration::from_secs(3600));
        let reply = service.execute(&ctx(), Command::ShowHand).expect("show hand");
        match reply {
            Reply::HandReport {
                hand,
                deck_remaining,
                ..
            } => {
                assert_eq!(hand.len(), 2);
                assert_eq!(deck_remaining, 1);
            }
            other => panic!("unexpected reply: {other:?}"),
        }
    }

    #[tokio::test]
    async fn corrupt_snapshot_falls_back_to_an_empty_registry() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("fateweaver.json");
        fs::write(&path, "{ torn write").unwrap();

        let service = Fateweaver::new(
            catalog(),
            JsonStore::new(path),
            Duration::from_secs(3600),
        );
        let reply = service.execute(&ctx(), Command::ShowHand).expect("commands still work");
        assert!(matches!(
            reply,
            Reply::HandReport { deck_remaining: 3, .. }
        ));
    }

    #[tokio::test]
    async fn invariant_breaking_snapshot_falls_back_to_an_empty_registry() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("fateweaver.json");
        // Card 0 in two piles at once.
        fs::write(
            &path,
            r#"{"guilds":{"100":{"tabletop_channel":null,"players":{"1":{"hand":[0],"discard":[],"deck":[0,1,2]}}}}}"#,
        )
        .unwrap();

        let service = Fateweaver::new(
            catalog(),
            JsonStore::new(path),
            Duration::from_secs(3600),
        );
        let reply = service.execute(&ctx(), Command::ShowHand).expect("commands still work");
        assert!(matches!(
            reply,
            Reply::HandReport { deck_remaining: 3, .. }
        ));
    }
}
