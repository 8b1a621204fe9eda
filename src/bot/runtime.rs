use crate::bot::dispatcher::Dispatcher;
use crate::bot::event::{ChoiceSet, InboundEvent, OutboundEffect};
use crate::bot::replies;
use crate::state::ConversationId;
use crate::utils::{BotError, Result};
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc::{self, error::TrySendError};
use tokio::task::JoinHandle;
use tokio::time::{Instant, MissedTickBehavior};
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, info, warn};

pub const DEFAULT_IDLE_TIMEOUT: Duration = Duration::from_secs(600);

const MIN_REAP_INTERVAL: Duration = Duration::from_secs(1);

#[async_trait]
pub trait Transport: Send + Sync + 'static {
    async fn deliver(&self, conversation_id: &str, effect: OutboundEffect) -> Result<()>;
}

/// Dispatches one event and delivers its effects in order. The first failed
/// delivery resets the conversation and replaces the remaining effects with a
/// single failure notice.
pub async fn process_event<T: Transport + ?Sized>(
    dispatcher: &Dispatcher,
    transport: &T,
    event: InboundEvent,
) {
    let conversation_id = event.conversation_id().to_string();
    let effects = dispatcher.handle(&event).await;

    for effect in effects {
        let file_name = match &effect {
            OutboundEffect::SendFile { file_name, .. } => Some(file_name.clone()),
            OutboundEffect::SendText { .. } => None,
        };

        if let Err(e) = transport.deliver(&conversation_id, effect).await {
            let notice = dispatcher
                .recover_from_transport_failure(&conversation_id, &e)
                .await;
            if let Err(e) = transport.deliver(&conversation_id, notice).await {
                error!(conversation_id = %conversation_id, error = %e, "Failed to deliver failure notice");
            }
            return;
        }

        if let Some(file_name) = file_name {
            info!(conversation_id = %conversation_id, file_name = %file_name, "Sent file");
        }
    }
}

struct ConversationWorker {
    tx: mpsc::Sender<InboundEvent>,
    handle: JoinHandle<()>,
    last_seen: Instant,
}

impl ConversationWorker {
    fn spawn<T: Transport>(
        conversation_id: ConversationId,
        dispatcher: Arc<Dispatcher>,
        transport: Arc<T>,
        buffer_size: usize,
        previous: Option<JoinHandle<()>>,
    ) -> Self {
        let (tx, mut rx) = mpsc::channel::<InboundEvent>(buffer_size.max(1));

        let handle = tokio::spawn(async move {
            // a retired worker of the same conversation drains first
            if let Some(previous) = previous {
                if let Err(e) = previous.await {
                    error!(conversation_id = %conversation_id, error = %e, "Conversation worker panicked");
                }
            }
            while let Some(event) = rx.recv().await {
                process_event(&dispatcher, transport.as_ref(), event).await;
            }
            debug!(conversation_id = %conversation_id, "Conversation worker stopped");
        });

        Self {
            tx,
            handle,
            last_seen: Instant::now(),
        }
    }
}

struct WorkerPool<T: Transport> {
    dispatcher: Arc<Dispatcher>,
    transport: Arc<T>,
    buffer_size: usize,
    idle_timeout: Duration,
    workers: HashMap<ConversationId, ConversationWorker>,
    retiring: HashMap<ConversationId, JoinHandle<()>>,
}

impl<T: Transport> WorkerPool<T> {
    fn new(
        dispatcher: Arc<Dispatcher>,
        transport: Arc<T>,
        buffer_size: usize,
        idle_timeout: Duration,
    ) -> Self {
        Self {
            dispatcher,
            transport,
            buffer_size,
            idle_timeout,
            workers: HashMap::new(),
            retiring: HashMap::new(),
        }
    }

    fn active(&self) -> usize {
        self.workers.len()
    }

    /// Queues the event on its conversation's worker without waiting. A full
    /// queue turns the event away with a busy notice.
    fn dispatch(&mut self, event: InboundEvent) {
        let conversation_id = event.conversation_id().to_string();
        let worker = self
            .workers
            .entry(conversation_id.clone())
            .or_insert_with(|| {
                ConversationWorker::spawn(
                    conversation_id.clone(),
                    self.dispatcher.clone(),
                    self.transport.clone(),
                    self.buffer_size,
                    self.retiring.remove(&conversation_id),
                )
            });
        worker.last_seen = Instant::now();

        match worker.tx.try_send(event) {
            Ok(()) => {}
            Err(TrySendError::Full(_)) => {
                warn!(conversation_id = %conversation_id, "Conversation queue full, rejecting event");
                self.notify_busy(conversation_id);
            }
            Err(TrySendError::Closed(_)) => {
                let err = BotError::ChannelClosed;
                warn!(conversation_id = %conversation_id, error = %err, "Dropping event");
                self.workers.remove(&conversation_id);
            }
        }
    }

    fn notify_busy(&self, conversation_id: ConversationId) {
        let transport = self.transport.clone();
        tokio::spawn(async move {
            let notice = OutboundEffect::text(replies::BUSY, ChoiceSet::Remove);
            if let Err(e) = transport.deliver(&conversation_id, notice).await {
                warn!(conversation_id = %conversation_id, error = %e, "Failed to deliver busy notice");
            }
        });
    }

    /// Closes the queues of workers that saw no event for `idle_timeout`.
    /// They finish what is queued and exit; a later event for the same
    /// conversation spawns a worker that waits for the old one first.
    fn reap_idle(&mut self, now: Instant) {
        self.retiring.retain(|_, handle| !handle.is_finished());

        let idle: Vec<ConversationId> = self
            .workers
            .iter()
            .filter(|(_, w)| now.saturating_duration_since(w.last_seen) >= self.idle_timeout)
            .map(|(id, _)| id.clone())
            .collect();

        for conversation_id in idle {
            if let Some(worker) = self.workers.remove(&conversation_id) {
                debug!(conversation_id = %conversation_id, "Retiring idle conversation worker");
                self.retiring.insert(conversation_id, worker.handle);
            }
        }
    }

    async fn finish(self) {
        let handles = self
            .workers
            .into_values()
            .map(|w| w.handle)
            .chain(self.retiring.into_values());
        for handle in handles {
            if let Err(e) = handle.await {
                error!(error = %e, "Conversation worker panicked");
            }
        }
    }
}

/// Routes inbound events to one worker per conversation. Events of one
/// conversation are processed in arrival order; conversations run
/// concurrently and a stalled one never holds up the router.
pub struct BotRuntime<T: Transport> {
    dispatcher: Arc<Dispatcher>,
    transport: Arc<T>,
    buffer_size: usize,
    idle_timeout: Duration,
}

impl<T: Transport> BotRuntime<T> {
    pub fn new(dispatcher: Dispatcher, transport: T, buffer_size: usize) -> Self {
        Self {
            dispatcher: Arc::new(dispatcher),
            transport: Arc::new(transport),
            buffer_size,
            idle_timeout: DEFAULT_IDLE_TIMEOUT,
        }
    }

    pub fn with_idle_timeout(mut self, idle_timeout: Duration) -> Self {
        self.idle_timeout = idle_timeout;
        self
    }

    pub fn dispatcher(&self) -> Arc<Dispatcher> {
        self.dispatcher.clone()
    }

    /// Consumes events until the channel closes or `shutdown` fires. Queued
    /// events are still processed before this returns.
    pub async fn run(self, mut events: mpsc::Receiver<InboundEvent>, shutdown: CancellationToken) {
        let mut reaper = tokio::time::interval(self.idle_timeout.max(MIN_REAP_INTERVAL));
        reaper.set_missed_tick_behavior(MissedTickBehavior::Delay);
        let mut pool = WorkerPool::new(
            self.dispatcher,
            self.transport,
            self.buffer_size,
            self.idle_timeout,
        );

        loop {
            tokio::select! {
                _ = shutdown.cancelled() => {
                    info!("Shutdown requested");
                    break;
                }
                _ = reaper.tick() => pool.reap_idle(Instant::now()),
                event = events.recv() => match event {
                    Some(event) => pool.dispatch(event),
                    None => break,
                },
            }
        }

        info!(conversations = pool.active(), "Waiting for conversations to finish");
        pool.finish().await;
    }
}
