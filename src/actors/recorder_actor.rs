use std::sync::Arc;

use tokio::spawn;
use tokio::sync::{mpsc, oneshot};
use tracing::{debug, error, info};

use crate::actors::RecorderError;
use crate::models::{DashboardSummary, Direction, TransactionRecord, UserProfile};
use crate::storage::{Storage, TRANSACTIONS_KEY, USER_KEY};
use crate::types::Amount;

/// The input of a single `record` call.
#[derive(Debug, Clone)]
pub struct RecordRequest {
    pub amount: Amount,
    pub counterparty: String,
    pub direction: Direction,
    pub note: Option<String>
}

enum RecorderCommand {
    Record {
        request: RecordRequest,
        reply: oneshot::Sender<Result<TransactionRecord, RecorderError>>
    },
    History {
        reply: oneshot::Sender<Result<Vec<TransactionRecord>, RecorderError>>
    },
    Summary {
        reply: oneshot::Sender<Result<DashboardSummary, RecorderError>>
    }
}

/// Owns every read-modify-write of the `transactions` list and the `user` balance.
///
/// All commands go through one task, so two submits can never interleave their
/// reads and writes.
pub struct RecorderActor;

impl RecorderActor {
    /// Spawns the recorder task and returns a handle to it.
    ///
    /// The task exits once every handle has been dropped.
    pub fn spawn<S: Storage>(storage: Arc<S>) -> RecorderHandle {
        let (sender, mut receiver) = mpsc::unbounded_channel();

        spawn(async move {
            while let Some(command) = receiver.recv().await {
                match command {
                    RecorderCommand::Record { request, reply } => {
                        let result = record(storage.as_ref(), request);

                        match &result {
                            Ok(record) => info!("Transaction [{}]:[{:?}] of {} recorded", record.id, record.direction, record.amount),
                            Err(error) => error!("Error updating transaction data: {error}")
                        }

                        let _ = reply.send(result);
                    },
                    RecorderCommand::History { reply } => {
                        let _ = reply.send(history(storage.as_ref()));
                    },
                    RecorderCommand::Summary { reply } => {
                        let _ = reply.send(summary(storage.as_ref()));
                    }
                }
            }

            debug!("Transaction recorder stopped");
        });

        RecorderHandle { sender }
    }
}

#[derive(Clone)]
pub struct RecorderHandle {
    sender: mpsc::UnboundedSender<RecorderCommand>
}

impl RecorderHandle {
    /// Creates a completed record, prepends it to the history and adjusts the balance.
    pub async fn record(&self, request: RecordRequest) -> Result<TransactionRecord, RecorderError> {
        let (reply, response) = oneshot::channel();
        self.send(RecorderCommand::Record { request, reply })?;
        response.await.map_err(|_| RecorderError::Unavailable)?
    }

    /// The session's transactions, newest first.
    pub async fn history(&self) -> Result<Vec<TransactionRecord>, RecorderError> {
        let (reply, response) = oneshot::channel();
        self.send(RecorderCommand::History { reply })?;
        response.await.map_err(|_| RecorderError::Unavailable)?
    }

    pub async fn summary(&self) -> Result<DashboardSummary, RecorderError> {
        let (reply, response) = oneshot::channel();
        self.send(RecorderCommand::Summary { reply })?;
        response.await.map_err(|_| RecorderError::Unavailable)?
    }

    fn send(&self, command: RecorderCommand) -> Result<(), RecorderError> {
        self.sender.send(command).map_err(|_| RecorderError::Unavailable)
    }
}

fn record<S: Storage>(storage: &S, request: RecordRequest) -> Result<TransactionRecord, RecorderError> {
    let mut records: Vec<TransactionRecord> = storage.load(TRANSACTIONS_KEY)?.unwrap_or_default();
    let mut profile: Option<UserProfile> = storage.load(USER_KEY)?;

    let record = TransactionRecord::completed(request.amount, &request.counterparty, request.direction, request.note);

    // Compute the balance before anything is written so an overflow leaves the store untouched.
    if let Some(profile) = profile.as_mut() {
        profile.apply(&record)?;
    }

    records.insert(0, record.clone());

    let previous = storage.get(TRANSACTIONS_KEY);
    storage.save(TRANSACTIONS_KEY, &records)?;

    if let Some(profile) = &profile {
        if let Err(save_error) = storage.save(USER_KEY, profile) {
            restore(storage, previous);
            return Err(save_error.into());
        }
    }

    Ok(record)
}

fn restore<S: Storage>(storage: &S, previous: Option<String>) {
    match previous {
        Some(raw) => {
            if let Err(error) = storage.set(TRANSACTIONS_KEY, raw) {
                error!("Could not roll back transaction history: {error}");
            }
        },
        None => storage.remove(TRANSACTIONS_KEY)
    }
}

fn history<S: Storage>(storage: &S) -> Result<Vec<TransactionRecord>, RecorderError> {
    Ok(storage.load(TRANSACTIONS_KEY)?.unwrap_or_default())
}

fn summary<S: Storage>(storage: &S) -> Result<DashboardSummary, RecorderError> {
    let records = history(storage)?;
    let balance = storage.load::<UserProfile>(USER_KEY)?
        .map(|profile| profile.balance)
        .unwrap_or_default();

    Ok(DashboardSummary::new(balance, &records)?)
}
