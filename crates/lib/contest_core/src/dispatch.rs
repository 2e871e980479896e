//! Chat dispatcher: runs a session's chat requests in the background.
//!
//! Each dispatcher owns one [`CancellationToken`]. Replies arrive on the
//! receiver returned by [`ChatDispatcher::new`]; the caller applies them to
//! its [`crate::Session`] with `apply_reply`. Every request yields at most one
//! reply, and none once the dispatcher is cancelled.
//!
//! [`ChatDispatcher::in_flight`] counts requests that have been dispatched
//! but not yet answered or cancelled; a chat view shows its "typing"
//! indicator while [`ChatDispatcher::is_processing`] is true.

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use serde::{Deserialize, Serialize};
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;
use tracing::debug;

use crate::responder::{self, ChatReply, ChatRequest, Responder};
use crate::session::Pending;

/// How queued requests are executed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DispatchMode {
    /// One task per request; replies arrive in completion order.
    #[default]
    Concurrent,
    /// One worker drains a FIFO queue; replies arrive in submission order.
    Serialized,
}

/// Holds one slot of the in-flight count until dropped.
struct InFlight(Arc<AtomicUsize>);

impl InFlight {
    fn acquire(count: &Arc<AtomicUsize>) -> Self {
        count.fetch_add(1, Ordering::SeqCst);
        Self(Arc::clone(count))
    }
}

impl Drop for InFlight {
    fn drop(&mut self) {
        self.0.fetch_sub(1, Ordering::SeqCst);
    }
}

type Queued = (ChatRequest, InFlight);

pub struct ChatDispatcher {
    responder: Arc<dyn Responder>,
    mode: DispatchMode,
    cancel: CancellationToken,
    replies: mpsc::UnboundedSender<ChatReply>,
    queue: Option<mpsc::UnboundedSender<Queued>>,
    in_flight: Arc<AtomicUsize>,
}

impl ChatDispatcher {
    /// Create a dispatcher and the receiver its replies are delivered on.
    ///
    /// Must be called from within a Tokio runtime.
    pub fn new(
        responder: Arc<dyn Responder>,
        mode: DispatchMode,
    ) -> (Self, mpsc::UnboundedReceiver<ChatReply>) {
        let cancel = CancellationToken::new();
        let (replies_tx, replies_rx) = mpsc::unbounded_channel();

        let queue = match mode {
            DispatchMode::Concurrent => None,
            DispatchMode::Serialized => {
                let (queue_tx, queue_rx) = mpsc::unbounded_channel();
                tokio::spawn(run_queue(
                    Arc::clone(&responder),
                    queue_rx,
                    replies_tx.clone(),
                    cancel.clone(),
                ));
                Some(queue_tx)
            }
        };

        let dispatcher = Self {
            responder,
            mode,
            cancel,
            replies: replies_tx,
            queue,
            in_flight: Arc::new(AtomicUsize::new(0)),
        };
        (dispatcher, replies_rx)
    }

    pub fn mode(&self) -> DispatchMode {
        self.mode
    }

    /// Requests dispatched but not yet answered or cancelled.
    pub fn in_flight(&self) -> usize {
        self.in_flight.load(Ordering::SeqCst)
    }

    pub fn is_processing(&self) -> bool {
        self.in_flight() > 0
    }

    /// Schedule one request. Ignored once cancelled.
    pub fn dispatch(&self, request: ChatRequest) {
        if self.cancel.is_cancelled() {
            debug!(message_id = %request.message_id, "dispatcher cancelled, dropping request");
            return;
        }

        let slot = InFlight::acquire(&self.in_flight);

        if let Some(queue) = &self.queue {
            // A failed send hands the slot back and drops it.
            if queue.send((request, slot)).is_err() {
                debug!("chat queue closed");
            }
            return;
        }

        let responder = Arc::clone(&self.responder);
        let replies = self.replies.clone();
        let cancel = self.cancel.clone();
        tokio::spawn(async move {
            tokio::select! {
                reply = responder::run(responder.as_ref(), &request) => {
                    drop(slot);
                    let _ = replies.send(reply);
                }
                _ = cancel.cancelled() => {
                    drop(slot);
                    debug!(message_id = %request.message_id, "chat request cancelled");
                }
            }
        });
    }

    /// Schedule every request produced by a session operation.
    pub fn dispatch_all(&self, pending: Pending) {
        for request in pending {
            self.dispatch(request);
        }
    }

    /// Abort in-flight and queued requests. Irreversible.
    pub fn cancel(&self) {
        self.cancel.cancel();
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancel.is_cancelled()
    }

    /// Token tied to this dispatcher, for callers that want to cancel from
    /// elsewhere or observe cancellation.
    pub fn cancellation_token(&self) -> CancellationToken {
        self.cancel.clone()
    }
}

/// Worker for [`DispatchMode::Serialized`].
async fn run_queue(
    responder: Arc<dyn Responder>,
    mut queue: mpsc::UnboundedReceiver<Queued>,
    replies: mpsc::UnboundedSender<ChatReply>,
    cancel: CancellationToken,
) {
    loop {
        let (request, slot) = tokio::select! {
            biased;
            _ = cancel.cancelled() => break,
            queued = queue.recv() => match queued {
                Some(queued) => queued,
                None => break, // Dispatcher dropped
            },
        };

        tokio::select! {
            reply = responder::run(responder.as_ref(), &request) => {
                drop(slot);
                if replies.send(reply).is_err() {
                    break; // Receiver dropped
                }
            }
            _ = cancel.cancelled() => break,
        }
    }
    debug!("chat queue worker stopped");
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::Duration;

    use async_trait::async_trait;

    use super::*;
    use crate::models::{Message, NewMessage, Ticket};
    use crate::responder::ResponderError;
    use crate::session::Session;

    /// Replies with the last message's content after a delay encoded in it
    /// (`"slow"` waits, anything else answers immediately).
    struct Paced;

    #[async_trait]
    impl Responder for Paced {
        async fn respond(&self, history: &[Message], _ticket: &Ticket) -> Result<String, ResponderError> {
            let last = history.last().map(|m| m.content.clone()).unwrap_or_default();
            if last == "slow" {
                tokio::time::sleep(Duration::from_millis(150)).await;
            }
            if last == "fail" {
                return Err(ResponderError::Relay("upstream down".into()));
            }
            Ok(format!("re: {last}"))
        }
    }

    /// Never answers.
    struct Hanging {
        started: Arc<AtomicUsize>,
    }

    #[async_trait]
    impl Responder for Hanging {
        async fn respond(&self, _history: &[Message], _ticket: &Ticket) -> Result<String, ResponderError> {
            self.started.fetch_add(1, Ordering::SeqCst);
            std::future::pending().await
        }
    }

    async fn collect(rx: &mut mpsc::UnboundedReceiver<ChatReply>, n: usize) -> Vec<ChatReply> {
        let mut out = Vec::new();
        for _ in 0..n {
            out.push(rx.recv().await.unwrap());
        }
        out
    }

    #[tokio::test]
    async fn concurrent_replies_arrive_in_completion_order() {
        let (dispatcher, mut rx) = ChatDispatcher::new(Arc::new(Paced), DispatchMode::Concurrent);
        let mut session = Session::new();
        dispatcher.dispatch_all(session.add_message(NewMessage::user("slow")));
        dispatcher.dispatch_all(session.add_message(NewMessage::user("fast")));

        let replies = collect(&mut rx, 2).await;
        let texts: Vec<_> = replies.iter().map(|r| r.outcome.as_ref().unwrap().clone()).collect();
        assert_eq!(texts, vec!["re: fast", "re: slow"]);
    }

    #[tokio::test]
    async fn serialized_replies_arrive_in_submission_order() {
        let (dispatcher, mut rx) = ChatDispatcher::new(Arc::new(Paced), DispatchMode::Serialized);
        let mut session = Session::new();
        dispatcher.dispatch_all(session.add_message(NewMessage::user("slow")));
        dispatcher.dispatch_all(session.add_message(NewMessage::user("fast")));

        let replies = collect(&mut rx, 2).await;
        let texts: Vec<_> = replies.iter().map(|r| r.outcome.as_ref().unwrap().clone()).collect();
        assert_eq!(texts, vec!["re: slow", "re: fast"]);
    }

    #[tokio::test]
    async fn overlapping_user_messages_each_get_one_outcome() {
        let (dispatcher, mut rx) = ChatDispatcher::new(Arc::new(Paced), DispatchMode::Concurrent);
        let mut session = Session::new();
        let first = session.add_message(NewMessage::user("slow"));
        let second = session.add_message(NewMessage::user("fail"));
        let mut ids: Vec<_> = first
            .requests()
            .iter()
            .chain(second.requests())
            .map(|r| r.message_id.clone())
            .collect();
        dispatcher.dispatch_all(first);
        dispatcher.dispatch_all(second);

        let replies = collect(&mut rx, 2).await;
        let mut seen: Vec<_> = replies.iter().map(|r| r.message_id.clone()).collect();
        ids.sort();
        seen.sort();
        assert_eq!(ids, seen);

        let before = session.messages().len();
        for reply in replies {
            session.apply_reply(reply);
        }
        assert_eq!(session.messages().len(), before + 2);

        drop(dispatcher);
        assert!(rx.recv().await.is_none());
    }

    #[tokio::test]
    async fn cancel_drops_in_flight_requests() {
        let started = Arc::new(AtomicUsize::new(0));
        let responder = Arc::new(Hanging {
            started: Arc::clone(&started),
        });
        let (dispatcher, mut rx) = ChatDispatcher::new(responder, DispatchMode::Concurrent);
        let mut session = Session::new();
        dispatcher.dispatch_all(session.add_message(NewMessage::user("hello")));

        while started.load(Ordering::SeqCst) == 0 {
            tokio::task::yield_now().await;
        }
        dispatcher.cancel();
        assert!(dispatcher.is_cancelled());
        drop(dispatcher);

        assert!(rx.recv().await.is_none());
    }

    #[tokio::test]
    async fn cancelled_dispatcher_ignores_new_requests() {
        let (dispatcher, mut rx) = ChatDispatcher::new(Arc::new(Paced), DispatchMode::Serialized);
        dispatcher.cancellation_token().cancel();

        let mut session = Session::new();
        dispatcher.dispatch_all(session.add_message(NewMessage::user("fast")));
        drop(dispatcher);

        assert!(rx.recv().await.is_none());
    }

    async fn drained(dispatcher: &ChatDispatcher) {
        tokio::time::timeout(Duration::from_secs(1), async {
            while dispatcher.is_processing() {
                tokio::task::yield_now().await;
            }
        })
        .await
        .expect("in-flight count should drain");
    }

    #[tokio::test]
    async fn in_flight_counts_overlapping_requests() {
        let (dispatcher, mut rx) = ChatDispatcher::new(Arc::new(Paced), DispatchMode::Concurrent);
        let mut session = Session::new();
        assert!(!dispatcher.is_processing());

        dispatcher.dispatch_all(session.add_message(NewMessage::user("slow")));
        dispatcher.dispatch_all(session.add_message(NewMessage::user("fast")));
        assert_eq!(dispatcher.in_flight(), 2);

        let first = rx.recv().await.unwrap();
        assert_eq!(first.outcome.unwrap(), "re: fast");
        assert_eq!(dispatcher.in_flight(), 1);
        assert!(dispatcher.is_processing());

        let _ = rx.recv().await.unwrap();
        assert_eq!(dispatcher.in_flight(), 0);
        assert!(!dispatcher.is_processing());
    }

    #[tokio::test]
    async fn in_flight_counts_failed_replies() {
        let (dispatcher, mut rx) = ChatDispatcher::new(Arc::new(Paced), DispatchMode::Serialized);
        let mut session = Session::new();
        dispatcher.dispatch_all(session.add_message(NewMessage::user("fail")));
        dispatcher.dispatch_all(session.add_message(NewMessage::user("fast")));
        assert_eq!(dispatcher.in_flight(), 2);

        let replies = collect(&mut rx, 2).await;
        assert!(replies[0].outcome.is_err());
        assert_eq!(dispatcher.in_flight(), 0);
    }

    #[tokio::test]
    async fn cancel_releases_in_flight_requests() {
        let started = Arc::new(AtomicUsize::new(0));
        let responder = Arc::new(Hanging {
            started: Arc::clone(&started),
        });
        let (dispatcher, mut rx) = ChatDispatcher::new(responder, DispatchMode::Concurrent);
        let mut session = Session::new();
        dispatcher.dispatch_all(session.add_message(NewMessage::user("one")));
        dispatcher.dispatch_all(session.add_message(NewMessage::user("two")));

        while started.load(Ordering::SeqCst) < 2 {
            tokio::task::yield_now().await;
        }
        assert_eq!(dispatcher.in_flight(), 2);

        dispatcher.cancel();
        drained(&dispatcher).await;
        assert_eq!(dispatcher.in_flight(), 0);
        assert!(rx.try_recv().is_err());
    }

    #[tokio::test]
    async fn cancel_releases_queued_requests() {
        let started = Arc::new(AtomicUsize::new(0));
        let responder = Arc::new(Hanging {
            started: Arc::clone(&started),
        });
        let (dispatcher, _rx) = ChatDispatcher::new(responder, DispatchMode::Serialized);
        let mut session = Session::new();
        dispatcher.dispatch_all(session.add_message(NewMessage::user("running")));
        dispatcher.dispatch_all(session.add_message(NewMessage::user("queued")));

        while started.load(Ordering::SeqCst) == 0 {
            tokio::task::yield_now().await;
        }
        assert_eq!(dispatcher.in_flight(), 2);

        dispatcher.cancel();
        drained(&dispatcher).await;
        assert_eq!(started.load(Ordering::SeqCst), 1);
    }
}
