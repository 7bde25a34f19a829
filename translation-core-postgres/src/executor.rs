use sqlx::{Postgres, Transaction};
use std::sync::Arc;
use tokio::sync::Mutex;

/// One database transaction shared by every repository of a session.
///
/// Repositories lock `tx` for the duration of a statement. `commit` and
/// `rollback` consume the transaction; later statements fail.
#[derive(Clone)]
pub struct Executor {
    pub tx: Arc<Mutex<Option<Transaction<'static, Postgres>>>>,
}

impl Executor {
    pub fn new(tx: Transaction<'static, Postgres>) -> Self {
        Self {
            tx: Arc::new(Mutex::new(Some(tx))),
        }
    }

    pub async fn commit(&self) -> Result<(), sqlx::Error> {
        let tx = self.tx.lock().await.take().ok_or_else(consumed)?;
        tx.commit().await
    }

    pub async fn rollback(&self) -> Result<(), sqlx::Error> {
        let tx = self.tx.lock().await.take().ok_or_else(consumed)?;
        tx.rollback().await
    }

    pub async fn is_active(&self) -> bool {
        self.tx.lock().await.is_some()
    }
}

fn consumed() -> sqlx::Error {
    sqlx::Error::Protocol("Transaction has been consumed".to_string())
}
