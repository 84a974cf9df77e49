use std::sync::Arc;

use shared::domain::Level;
use tokio::sync::mpsc;
use tracing::{debug, warn};

use crate::{
    cascade::{CascadeController, FetchCompletion, FetchTicket, Selection},
    fetcher::{fetch_options, FetchError, OptionFetcher},
};

/// Drives a [`CascadeController`]: runs each fetch it asks for on its own task
/// and applies completions one at a time on the owner's task.
pub struct VehiclePicker {
    controller: CascadeController,
    fetcher: Arc<dyn OptionFetcher>,
    completions_tx: mpsc::UnboundedSender<FetchCompletion>,
    completions_rx: mpsc::UnboundedReceiver<FetchCompletion>,
}

impl VehiclePicker {
    pub fn new(fetcher: Arc<dyn OptionFetcher>) -> Self {
        let (completions_tx, completions_rx) = mpsc::unbounded_channel();
        Self {
            controller: CascadeController::new(),
            fetcher,
            completions_tx,
            completions_rx,
        }
    }

    pub fn controller(&self) -> &CascadeController {
        &self.controller
    }

    pub fn start(&mut self) {
        let tickets = self.controller.start();
        self.dispatch(tickets);
    }

    pub fn select(&mut self, selection: Selection) {
        let tickets = self.controller.select(selection);
        self.dispatch(tickets);
    }

    pub fn clear(&mut self, level: Level) {
        let tickets = self.controller.clear(level);
        self.dispatch(tickets);
    }

    pub fn reset(&mut self) {
        let tickets = self.controller.reset();
        self.dispatch(tickets);
    }

    /// Wait for the next finished fetch and apply it. Returns whether it committed.
    pub async fn next_completion(&mut self) -> bool {
        match self.completions_rx.recv().await {
            Some(completion) => self.controller.apply(completion),
            None => false,
        }
    }

    /// Apply completions until no slot is loading.
    pub async fn settle(&mut self) {
        while self.controller.is_loading() {
            self.next_completion().await;
        }
    }

    fn dispatch(&self, tickets: Vec<FetchTicket>) {
        for ticket in tickets {
            let fetcher = Arc::clone(&self.fetcher);
            let completions = self.completions_tx.clone();
            debug!(level = %ticket.level, generation = ticket.generation, "spawning option fetch");
            let query = ticket.query.clone();
            tokio::spawn(async move {
                let fetch =
                    tokio::spawn(async move { fetch_options(&*fetcher, &query).await });
                let result = match fetch.await {
                    Ok(result) => result,
                    Err(err) => {
                        warn!(level = %ticket.level, error = %err, "option fetch task died");
                        Err(FetchError::TaskFailed(err.to_string()))
                    }
                };
                let _ = completions.send(FetchCompletion { ticket, result });
            });
        }
    }
}

#[cfg(test)]
#[path = "tests/picker_tests.rs"]
mod tests;
