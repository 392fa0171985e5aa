//! Page transition sequencing
//!
//! When the route identity changes, the page fades out while still showing
//! the old content, the content is swapped once a fixed exit delay has
//! elapsed, and the page fades back in.
//!
//! The state machine lives in [`TransitionMachine`], which knows nothing
//! about time: every entry into `Transitioning` issues a fresh
//! [`SwapTicket`], and only the latest ticket may complete the swap.
//! [`PageTransitionSequencer`] drives the machine with a tokio timer and
//! owns the cancellable handle for it. A newer route change aborts the
//! pending timer before scheduling its own, so intermediate routes inside
//! the delay window are never rendered.

use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{broadcast, watch};
use tokio::task::JoinHandle;

/// Exit delay used by fast transitions (150ms)
pub const FAST_EXIT_DELAY: Duration = Duration::from_millis(150);

/// Exit delay used by slow transitions (500ms)
pub const SLOW_EXIT_DELAY: Duration = Duration::from_millis(500);

/// Sequencer configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TransitionConfig {
    /// Time between the start of the fade-out and the content swap
    pub exit_delay: Duration,
}

impl Default for TransitionConfig {
    fn default() -> Self {
        Self::fast()
    }
}

impl TransitionConfig {
    /// 150ms exit delay
    pub fn fast() -> Self {
        Self { exit_delay: FAST_EXIT_DELAY }
    }

    /// 500ms exit delay
    pub fn slow() -> Self {
        Self { exit_delay: SLOW_EXIT_DELAY }
    }

    /// Set the exit delay
    pub fn exit_delay(mut self, delay: Duration) -> Self {
        self.exit_delay = delay;
        self
    }
}

/// The two sequencer states
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum TransitionPhase {
    /// Showing the latest content at full visibility
    #[default]
    Settled,
    /// Fading out the retained content, waiting for the swap
    Transitioning,
}

/// Visibility the page is being driven towards
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Visibility {
    /// Fully transparent (fade-out)
    Hidden,
    /// Fully opaque (fade-in)
    #[default]
    Visible,
}

impl Visibility {
    /// Target opacity for this visibility
    pub fn opacity(&self) -> f32 {
        match self {
            Visibility::Hidden => 0.0,
            Visibility::Visible => 1.0,
        }
    }
}

/// Identifies one entry into `Transitioning`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SwapTicket(u64);

/// Point-in-time view of the sequencer
#[derive(Debug, Clone, PartialEq)]
pub struct TransitionSnapshot<C> {
    /// Content currently on screen
    pub displayed: C,
    /// Content of the latest route
    pub latest: C,
    /// Current state
    pub phase: TransitionPhase,
    /// Visibility being driven towards
    pub visibility: Visibility,
}

impl<C> TransitionSnapshot<C> {
    /// Whether a swap is pending
    pub fn is_transitioning(&self) -> bool {
        self.phase == TransitionPhase::Transitioning
    }
}

/// Transition state machine, independent of any clock
#[derive(Debug, Clone)]
pub struct TransitionMachine<K, C> {
    recorded: K,
    displayed: C,
    latest: C,
    phase: TransitionPhase,
    visibility: Visibility,
    next_ticket: u64,
    pending: Option<SwapTicket>,
}

impl<K: PartialEq, C: Clone> TransitionMachine<K, C> {
    /// Start settled on the initial route's content
    pub fn new(identity: K, content: C) -> Self {
        Self {
            recorded: identity,
            displayed: content.clone(),
            latest: content,
            phase: TransitionPhase::Settled,
            visibility: Visibility::Visible,
            next_ticket: 0,
            pending: None,
        }
    }

    /// Record a route change
    ///
    /// Returns the ticket the caller must redeem after the exit delay, or
    /// `None` if the identity is unchanged. Any previously issued ticket is
    /// invalidated.
    pub fn route_changed(&mut self, identity: K, content: C) -> Option<SwapTicket> {
        if identity == self.recorded {
            return None;
        }

        self.recorded = identity;
        self.latest = content;
        self.phase = TransitionPhase::Transitioning;
        self.visibility = Visibility::Hidden;

        self.next_ticket += 1;
        let ticket = SwapTicket(self.next_ticket);
        self.pending = Some(ticket);
        Some(ticket)
    }

    /// Complete the swap for `ticket`
    ///
    /// Returns `false` and changes nothing if the ticket has been
    /// superseded.
    pub fn swap(&mut self, ticket: SwapTicket) -> bool {
        if self.pending != Some(ticket) {
            return false;
        }

        self.pending = None;
        self.displayed = self.latest.clone();
        self.phase = TransitionPhase::Settled;
        self.visibility = Visibility::Visible;
        true
    }

    /// Content currently on screen
    pub fn displayed(&self) -> &C {
        &self.displayed
    }

    /// Content of the latest route
    pub fn latest(&self) -> &C {
        &self.latest
    }

    /// Current state
    pub fn phase(&self) -> TransitionPhase {
        self.phase
    }

    /// Visibility being driven towards
    pub fn visibility(&self) -> Visibility {
        self.visibility
    }

    /// Whether a swap is pending
    pub fn is_transitioning(&self) -> bool {
        self.phase == TransitionPhase::Transitioning
    }

    /// Copy out the current state
    pub fn snapshot(&self) -> TransitionSnapshot<C> {
        TransitionSnapshot {
            displayed: self.displayed.clone(),
            latest: self.latest.clone(),
            phase: self.phase,
            visibility: self.visibility,
        }
    }
}

/// Events emitted by the sequencer
#[derive(Debug, Clone, PartialEq)]
pub enum TransitionEvent<C> {
    /// A fade-out started towards `target`, replacing any pending swap
    ExitStarted {
        /// Content that will be shown after the swap
        target: C,
    },
    /// The retained content was swapped and the fade-in started
    Swapped {
        /// Content now on screen
        content: C,
    },
}

/// Pending swap timer, aborted when dropped
struct SwapTimer {
    ticket: SwapTicket,
    handle: JoinHandle<()>,
}

impl Drop for SwapTimer {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

struct Inner<K, C> {
    machine: Mutex<TransitionMachine<K, C>>,
    snapshot_tx: watch::Sender<TransitionSnapshot<C>>,
    events_tx: broadcast::Sender<TransitionEvent<C>>,
}

impl<K, C> Inner<K, C>
where
    K: PartialEq,
    C: Clone,
{
    fn publish(&self, snapshot: TransitionSnapshot<C>) {
        self.snapshot_tx.send_replace(snapshot);
    }

    fn swap(&self, ticket: SwapTicket) {
        let mut machine = self.machine.lock();
        if !machine.swap(ticket) {
            tracing::trace!(?ticket, "stale swap ignored");
            return;
        }
        tracing::debug!(?ticket, "transition settled");

        // published under the machine lock so snapshots reach subscribers in order
        let snapshot = machine.snapshot();
        let _ = self
            .events_tx
            .send(TransitionEvent::Swapped { content: snapshot.displayed.clone() });
        self.publish(snapshot);
    }
}

/// Route-driven fade-out/swap/fade-in sequencer
///
/// Must be driven from inside a tokio runtime.
///
/// # Example
///
/// ```no_run
/// use app_state::transition::{PageTransitionSequencer, TransitionConfig};
///
/// #[tokio::main]
/// async fn main() {
///     let sequencer = PageTransitionSequencer::new(
///         TransitionConfig::fast(),
///         "/home".to_string(),
///         "Home".to_string(),
///     );
///
///     sequencer.route_changed("/search".to_string(), "Search".to_string());
///     assert!(sequencer.is_transitioning());
///     assert_eq!(sequencer.displayed(), "Home");
///
///     tokio::time::sleep(std::time::Duration::from_millis(200)).await;
///     assert_eq!(sequencer.displayed(), "Search");
/// }
/// ```
pub struct PageTransitionSequencer<K, C> {
    inner: Arc<Inner<K, C>>,
    timer: Mutex<Option<SwapTimer>>,
    config: TransitionConfig,
}

impl<K, C> PageTransitionSequencer<K, C>
where
    K: PartialEq + Send + 'static,
    C: Clone + Send + Sync + 'static,
{
    /// Create a settled sequencer showing the initial route's content
    pub fn new(config: TransitionConfig, identity: K, content: C) -> Self {
        let machine = TransitionMachine::new(identity, content);
        let (snapshot_tx, _) = watch::channel(machine.snapshot());
        let (events_tx, _) = broadcast::channel(16);

        Self {
            inner: Arc::new(Inner { machine: Mutex::new(machine), snapshot_tx, events_tx }),
            timer: Mutex::new(None),
            config,
        }
    }

    /// Observe a route identity
    ///
    /// Starts a transition if the identity differs from the last one
    /// observed. A transition already in flight is superseded: its timer is
    /// cancelled and only `content` will be swapped in.
    pub fn route_changed(&self, identity: K, content: C) {
        // lock order: timer slot, then machine
        let mut timer = self.timer.lock();
        let mut machine = self.inner.machine.lock();
        let Some(ticket) = machine.route_changed(identity, content) else {
            return;
        };

        match timer.take() {
            Some(previous) => {
                tracing::debug!(superseded = ?previous.ticket, ?ticket, "transition restarted")
            }
            None => tracing::debug!(?ticket, "transition started"),
        }

        let snapshot = machine.snapshot();
        let _ = self
            .inner
            .events_tx
            .send(TransitionEvent::ExitStarted { target: snapshot.latest.clone() });
        self.inner.publish(snapshot);
        drop(machine);

        let inner = Arc::clone(&self.inner);
        let delay = self.config.exit_delay;
        let handle = tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            inner.swap(ticket);
        });
        *timer = Some(SwapTimer { ticket, handle });
    }

    /// Content currently on screen
    pub fn displayed(&self) -> C {
        self.inner.machine.lock().displayed().clone()
    }

    /// Whether a swap is pending
    pub fn is_transitioning(&self) -> bool {
        self.inner.machine.lock().is_transitioning()
    }

    /// Copy out the current state
    pub fn snapshot(&self) -> TransitionSnapshot<C> {
        self.inner.machine.lock().snapshot()
    }

    /// Subscribe to state changes
    pub fn subscribe(&self) -> watch::Receiver<TransitionSnapshot<C>> {
        self.inner.snapshot_tx.subscribe()
    }

    /// Subscribe to transition events
    pub fn subscribe_events(&self) -> broadcast::Receiver<TransitionEvent<C>> {
        self.inner.events_tx.subscribe()
    }

    /// The configured exit delay
    pub fn exit_delay(&self) -> Duration {
        self.config.exit_delay
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::sync::broadcast::error::TryRecvError;

    fn machine() -> TransitionMachine<&'static str, &'static str> {
        TransitionMachine::new("/home", "home page")
    }

    fn sequencer(
        delay_ms: u64,
    ) -> PageTransitionSequencer<&'static str, &'static str> {
        PageTransitionSequencer::new(
            TransitionConfig::default().exit_delay(Duration::from_millis(delay_ms)),
            "/home",
            "home page",
        )
    }

    // ==========================================================================
    // Machine Tests
    // ==========================================================================

    #[test]
    fn test_initial_state_settled() {
        let m = machine();
        assert_eq!(m.phase(), TransitionPhase::Settled);
        assert_eq!(m.visibility(), Visibility::Visible);
        assert_eq!(*m.displayed(), "home page");
        assert!(!m.is_transitioning());
    }

    #[test]
    fn test_route_change_fades_out_keeping_old_content() {
        let mut m = machine();
        let ticket = m.route_changed("/search", "search page");

        assert!(ticket.is_some());
        assert_eq!(m.phase(), TransitionPhase::Transitioning);
        assert_eq!(m.visibility(), Visibility::Hidden);
        assert_eq!(*m.displayed(), "home page");
        assert_eq!(*m.latest(), "search page");
    }

    #[test]
    fn test_same_identity_is_ignored() {
        let mut m = machine();
        assert!(m.route_changed("/home", "home page again").is_none());
        assert_eq!(m.phase(), TransitionPhase::Settled);
        assert_eq!(*m.latest(), "home page");
    }

    #[test]
    fn test_swap_settles_and_fades_in() {
        let mut m = machine();
        let ticket = m.route_changed("/search", "search page").unwrap();

        assert!(m.swap(ticket));
        assert_eq!(m.phase(), TransitionPhase::Settled);
        assert_eq!(m.visibility(), Visibility::Visible);
        assert_eq!(*m.displayed(), "search page");

        // redeeming twice does nothing
        assert!(!m.swap(ticket));
    }

    #[test]
    fn test_superseded_ticket_is_stale() {
        let mut m = machine();
        let b = m.route_changed("/search", "search page").unwrap();
        let c = m.route_changed("/checkout", "checkout page").unwrap();
        assert_ne!(b, c);

        assert!(!m.swap(b));
        assert_eq!(*m.displayed(), "home page");
        assert!(m.is_transitioning());

        assert!(m.swap(c));
        assert_eq!(*m.displayed(), "checkout page");
    }

    #[test]
    fn test_return_to_displayed_route_still_transitions() {
        let mut m = machine();
        m.route_changed("/search", "search page").unwrap();
        let back = m.route_changed("/home", "home page").unwrap();
        assert!(m.is_transitioning());
        assert!(m.swap(back));
        assert_eq!(*m.displayed(), "home page");
    }

    #[test]
    fn test_visibility_opacity() {
        assert_eq!(Visibility::Hidden.opacity(), 0.0);
        assert_eq!(Visibility::Visible.opacity(), 1.0);
    }

    #[test]
    fn test_phase_serialization() {
        let json = serde_json::to_string(&TransitionPhase::Transitioning).unwrap();
        assert_eq!(json, "\"transitioning\"");
    }

    #[test]
    fn test_config() {
        assert_eq!(TransitionConfig::default().exit_delay, FAST_EXIT_DELAY);
        assert_eq!(TransitionConfig::slow().exit_delay, Duration::from_millis(500));
    }

    // ==========================================================================
    // Sequencer Tests
    // ==========================================================================

    #[tokio::test(start_paused = true)]
    async fn test_swap_after_delay() {
        let seq = sequencer(150);
        seq.route_changed("/search", "search page");

        assert!(seq.is_transitioning());
        assert_eq!(seq.displayed(), "home page");

        tokio::time::sleep(Duration::from_millis(100)).await;
        assert!(seq.is_transitioning());
        assert_eq!(seq.displayed(), "home page");

        tokio::time::sleep(Duration::from_millis(60)).await;
        assert!(!seq.is_transitioning());
        assert_eq!(seq.displayed(), "search page");
        assert_eq!(seq.snapshot().visibility, Visibility::Visible);
    }

    #[tokio::test(start_paused = true)]
    async fn test_last_write_wins() {
        let seq = sequencer(150);
        let mut events = seq.subscribe_events();

        seq.route_changed("/search", "search page");
        seq.route_changed("/checkout", "checkout page");

        tokio::time::sleep(Duration::from_millis(200)).await;
        assert_eq!(seq.displayed(), "checkout page");
        assert!(!seq.is_transitioning());

        assert_eq!(
            events.try_recv().unwrap(),
            TransitionEvent::ExitStarted { target: "search page" }
        );
        assert_eq!(
            events.try_recv().unwrap(),
            TransitionEvent::ExitStarted { target: "checkout page" }
        );
        assert_eq!(
            events.try_recv().unwrap(),
            TransitionEvent::Swapped { content: "checkout page" }
        );
        assert!(matches!(events.try_recv(), Err(TryRecvError::Empty)));
    }

    #[tokio::test(start_paused = true)]
    async fn test_supersede_restarts_timer() {
        let seq = sequencer(150);

        seq.route_changed("/search", "search page");
        tokio::time::sleep(Duration::from_millis(100)).await;
        seq.route_changed("/checkout", "checkout page");

        // first timer would have fired at 150ms
        tokio::time::sleep(Duration::from_millis(100)).await;
        assert!(seq.is_transitioning());
        assert_eq!(seq.displayed(), "home page");

        tokio::time::sleep(Duration::from_millis(60)).await;
        assert_eq!(seq.displayed(), "checkout page");
    }

    #[tokio::test(start_paused = true)]
    async fn test_subscribers_see_phases() {
        let seq = sequencer(150);
        let mut rx = seq.subscribe();
        assert_eq!(rx.borrow().phase, TransitionPhase::Settled);

        seq.route_changed("/search", "search page");
        rx.changed().await.unwrap();
        assert!(rx.borrow_and_update().is_transitioning());

        rx.changed().await.unwrap();
        let snapshot = rx.borrow_and_update().clone();
        assert_eq!(snapshot.phase, TransitionPhase::Settled);
        assert_eq!(snapshot.displayed, "search page");
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 2)]
    async fn test_concurrent_changes_always_settle() {
        let seq = Arc::new(PageTransitionSequencer::new(
            TransitionConfig::default().exit_delay(Duration::from_millis(1)),
            0usize,
            0usize,
        ));

        for round in 0..200usize {
            let barrier = Arc::new(std::sync::Barrier::new(8));
            let threads: Vec<_> = (1..=8)
                .map(|i| {
                    let seq = Arc::clone(&seq);
                    let barrier = Arc::clone(&barrier);
                    let runtime = tokio::runtime::Handle::current();
                    std::thread::spawn(move || {
                        let _guard = runtime.enter();
                        barrier.wait();
                        let target = round * 10 + i;
                        seq.route_changed(target, target);
                    })
                })
                .collect();
            for thread in threads {
                thread.join().unwrap();
            }

            let settled = tokio::time::timeout(Duration::from_secs(1), async {
                while seq.is_transitioning() {
                    tokio::time::sleep(Duration::from_millis(1)).await;
                }
            })
            .await;
            assert!(settled.is_ok(), "round {} never settled", round);

            let snapshot = seq.snapshot();
            assert_eq!(snapshot.displayed, snapshot.latest);
            assert_eq!(*seq.subscribe().borrow(), snapshot);
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_drop_cancels_pending_swap() {
        let seq = sequencer(150);
        let mut events = seq.subscribe_events();
        seq.route_changed("/search", "search page");
        drop(seq);

        tokio::time::sleep(Duration::from_millis(200)).await;
        assert!(matches!(events.recv().await, Ok(TransitionEvent::ExitStarted { .. })));
        assert!(events.recv().await.is_err());
    }
}
