use anyhow::{anyhow, Context, Result};
use crossbeam::channel::{bounded, unbounded, Receiver, Sender};
use log::{debug, warn};
use std::hash::Hash;
use std::thread::JoinHandle;

use super::{QTable, StateKey, TableStats, ValueStore};

pub enum TableRequest<A> {
    Get {
        state: StateKey,
        actions: Vec<A>,
        reply: Sender<Vec<f32>>,
    },
    Merge(Vec<(StateKey, A, f32)>),
    Stats(Sender<TableStats>),
    Shutdown,
}

/// Owns the value table on a dedicated thread. Every read and write is a message, so each one is atomic,
/// but nothing spans a whole match: concurrent writers may interleave and the last write wins.
pub struct TableActor<A: Hash + Eq> {
    requests: Sender<TableRequest<A>>,
    thread: JoinHandle<QTable<A>>,
}

impl<A> TableActor<A>
where
    A: Hash + Eq + Send + 'static,
{
    pub fn spawn(table: QTable<A>) -> Result<Self> {
        let (requests, inbox) = unbounded();

        let thread = std::thread::Builder::new()
            .name("value-table".to_string())
            .spawn(move || serve(table, inbox))
            .context("Failed to spawn the value table thread")?;

        Ok(Self { requests, thread })
    }

    pub fn handle(&self) -> TableHandle<A> {
        TableHandle {
            requests: self.requests.clone(),
        }
    }

    /// Stops the actor and hands back the table. Requests still queued ahead of the shutdown are served first.
    pub fn shutdown(self) -> Result<QTable<A>> {
        self.requests
            .send(TableRequest::Shutdown)
            .map_err(|_| anyhow!("Value table actor has already stopped"))?;

        self.thread
            .join()
            .map_err(|_| anyhow!("Value table actor panicked"))
    }
}

fn serve<A: Hash + Eq>(mut table: QTable<A>, inbox: Receiver<TableRequest<A>>) -> QTable<A> {
    for request in inbox.iter() {
        match request {
            TableRequest::Get {
                state,
                actions,
                reply,
            } => {
                let values = actions
                    .into_iter()
                    .map(|action| table.get(&state, action))
                    .collect();

                if reply.send(values).is_err() {
                    warn!("Requester dropped before receiving table values");
                }
            }
            TableRequest::Merge(updates) => table.merge(updates),
            TableRequest::Stats(reply) => {
                if reply.send(table.stats()).is_err() {
                    warn!("Requester dropped before receiving table stats");
                }
            }
            TableRequest::Shutdown => break,
        }
    }

    debug!("Value table actor stopping with {} entries", table.len());

    table
}

/// Cloneable client of a `TableActor`, handed to each worker.
pub struct TableHandle<A> {
    requests: Sender<TableRequest<A>>,
}

impl<A> Clone for TableHandle<A> {
    fn clone(&self) -> Self {
        Self {
            requests: self.requests.clone(),
        }
    }
}

impl<A> TableHandle<A> {
    pub fn stats(&self) -> Result<TableStats> {
        let (reply, response) = bounded(1);
        self.send(TableRequest::Stats(reply))?;

        response
            .recv()
            .map_err(|_| anyhow!("Value table actor stopped before replying"))
    }

    pub fn merge(&self, updates: Vec<(StateKey, A, f32)>) -> Result<()> {
        self.send(TableRequest::Merge(updates))
    }

    fn send(&self, request: TableRequest<A>) -> Result<()> {
        self.requests
            .send(request)
            .map_err(|_| anyhow!("Value table actor has stopped"))
    }
}

impl<A: Clone> ValueStore<A> for TableHandle<A> {
    fn values(&self, state: &StateKey, actions: &[A]) -> Result<Vec<f32>> {
        let (reply, response) = bounded(1);
        self.send(TableRequest::Get {
            state: *state,
            actions: actions.to_vec(),
            reply,
        })?;

        response
            .recv()
            .map_err(|_| anyhow!("Value table actor stopped before replying"))
    }

    fn set_value(&mut self, state: StateKey, action: A, value: f32) -> Result<()> {
        self.merge(vec![(state, action, value)])
    }
}
