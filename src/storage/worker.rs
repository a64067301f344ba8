use std::sync::mpsc::{self, Receiver, Sender};
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use tracing::{debug, warn};
use crate::error::StoreError;
use crate::models::{ItemEntry, KillRecord};
use crate::storage::store::LootRecordStore;

/// Writes queued from event handlers, applied in submission order on the worker thread.
#[derive(Debug, Clone)]
pub enum StoreCommand {
    SetIdentity(Option<String>),
    Append(KillRecord),
    Rewrite { entity: String, records: Vec<KillRecord> },
    AmendLast { entity: String, drops: Vec<ItemEntry> },
    Delete(String),
    Migrate(String),
}

pub struct StoreWorker {
    sender: Option<Sender<StoreCommand>>,
    handle: Option<JoinHandle<()>>,
}

impl StoreWorker {
    pub fn spawn(store: Arc<LootRecordStore>) -> Result<Self, StoreError> {
        let (sender, receiver) = mpsc::channel();
        let handle = thread::Builder::new()
            .name("loot-store-writer".to_string())
            .spawn(move || store_worker_thread(store, receiver))?;

        Ok(Self {
            sender: Some(sender),
            handle: Some(handle),
        })
    }

    /// Queues `command` without waiting for it. Returns false once the worker has stopped.
    pub fn submit(&self, command: StoreCommand) -> bool {
        match &self.sender {
            Some(sender) => sender.send(command).is_ok(),
            None => false,
        }
    }

    /// Finishes every queued command, then joins the thread.
    pub fn shutdown(mut self) {
        self.stop();
    }

    fn stop(&mut self) {
        drop(self.sender.take());
        if let Some(handle) = self.handle.take() {
            if handle.join().is_err() {
                warn!("Loot store writer thread panicked");
            }
        }
    }
}

impl Drop for StoreWorker {
    fn drop(&mut self) {
        self.stop();
    }
}

fn store_worker_thread(store: Arc<LootRecordStore>, receiver: Receiver<StoreCommand>) {
    debug!("Loot store writer started");

    // Ends when every sender is gone and the queue is drained
    for command in receiver {
        let ok = match command {
            StoreCommand::SetIdentity(identity) => store.set_identity(identity.as_deref()),
            StoreCommand::Append(record) => store.append(&record),
            StoreCommand::Rewrite { entity, records } => store.rewrite(&entity, &records),
            StoreCommand::AmendLast { entity, drops } => store.amend_last(&entity, drops),
            StoreCommand::Delete(entity) => store.delete(&entity),
            StoreCommand::Migrate(entity) => store.migrate(&entity),
        };
        if !ok {
            debug!("Loot store command dropped after failure");
        }
    }

    debug!("Loot store writer stopped");
}
