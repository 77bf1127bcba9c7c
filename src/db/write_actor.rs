use std::any::Any;

use diesel::SqliteConnection;
use log::error;
use tokio::sync::{mpsc, oneshot};

use super::DbPool;
use crate::errors::{DatabaseError, Error, Result};

// Job executed on the writer's dedicated connection. Results are
// type-erased so one channel can carry jobs of any return type.
type Job<T> = Box<dyn FnOnce(&mut SqliteConnection) -> Result<T> + Send + 'static>;

type ErasedJob = Job<Box<dyn Any + Send + 'static>>;
type Reply = oneshot::Sender<Result<Box<dyn Any + Send + 'static>>>;

/// Handle for submitting write jobs to the single-writer actor.
#[derive(Clone)]
pub struct WriteHandle {
    tx: mpsc::Sender<(ErasedJob, Reply)>,
}

impl WriteHandle {
    /// Runs `job` on the writer connection and returns its result.
    ///
    /// Jobs run strictly in submission order. A job that needs atomicity
    /// across several statements opens its own transaction on the
    /// connection it is handed.
    pub async fn exec<F, T>(&self, job: F) -> Result<T>
    where
        F: FnOnce(&mut SqliteConnection) -> Result<T> + Send + 'static,
        T: Send + 'static + Any,
    {
        let (ret_tx, ret_rx) = oneshot::channel();

        let erased: ErasedJob =
            Box::new(move |conn| job(conn).map(|value| Box::new(value) as Box<dyn Any + Send>));

        self.tx.send((erased, ret_tx)).await.map_err(|_| {
            Error::Database(DatabaseError::WriterUnavailable(
                "writer actor is no longer running".to_string(),
            ))
        })?;

        let boxed = ret_rx.await.map_err(|_| {
            Error::Database(DatabaseError::WriterUnavailable(
                "writer actor dropped the reply channel".to_string(),
            ))
        })??;

        Ok(*boxed
            .downcast::<T>()
            .expect("writer job reply type mismatch"))
    }
}

/// Spawns the background task that owns the single write connection.
///
/// Every mutation in the process goes through this actor, so writes are
/// serialized even when services are called concurrently.
pub fn spawn_writer(pool: DbPool) -> WriteHandle {
    let (tx, mut rx) = mpsc::channel::<(ErasedJob, Reply)>(1024);

    tokio::spawn(async move {
        let mut conn = match pool.get() {
            Ok(conn) => conn,
            Err(e) => {
                error!("Writer actor could not acquire a connection: {}", e);
                return;
            }
        };

        while let Some((job, reply_tx)) = rx.recv().await {
            let result = job(&mut conn);
            // Receiver may be gone if the caller was cancelled.
            let _ = reply_tx.send(result);
        }
    });

    WriteHandle { tx }
}
