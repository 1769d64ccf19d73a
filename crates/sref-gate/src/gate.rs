use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use tracing::{debug, warn};

use crate::clock::{Clock, SystemClock};
use crate::config::GateConfig;
use crate::provider::LockStatusProvider;

/// Whether the gate's cached answer can be returned without a query.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Freshness {
    /// The cached answer is authoritative.
    Fresh,
    /// The next [`ReadOnlyGate::is_locked`] call will query the provider.
    Stale,
}

#[derive(Debug)]
struct GateState {
    last_checked: Option<Duration>,
    cached_locked: bool,
}

/// Debounced cache around the provider's blocking lock-status query.
///
/// The gate starts stale. A call to [`Self::is_locked`] while stale runs the
/// query, stores the answer and the time, and becomes fresh; it goes stale
/// again once more than `config.debounce` has elapsed.
pub struct ReadOnlyGate {
    config: GateConfig,
    provider: Option<Arc<dyn LockStatusProvider>>,
    clock: Arc<dyn Clock>,
    state: Mutex<GateState>,
}

impl std::fmt::Debug for ReadOnlyGate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ReadOnlyGate")
            .field("config", &self.config)
            .field("has_provider", &self.provider.is_some())
            .field("state", &*self.state())
            .finish()
    }
}

impl ReadOnlyGate {
    /// Create a gate on the system clock. `None` means no version control.
    pub fn new(config: GateConfig, provider: Option<Arc<dyn LockStatusProvider>>) -> Self {
        Self::with_clock(config, provider, Arc::new(SystemClock::new()))
    }

    /// Create a gate on an explicit clock.
    pub fn with_clock(
        config: GateConfig,
        provider: Option<Arc<dyn LockStatusProvider>>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            config,
            provider,
            clock,
            state: Mutex::new(GateState {
                last_checked: None,
                cached_locked: true,
            }),
        }
    }

    /// The current configuration.
    pub fn config(&self) -> &GateConfig {
        &self.config
    }

    /// Whether the manifest is read-only, re-querying at most once per
    /// debounce window.
    pub fn is_locked(&self) -> bool {
        let now = self.clock.now();
        let mut state = self.state();
        if Self::freshness_at(&state, now, self.config.debounce) == Freshness::Fresh {
            return state.cached_locked;
        }

        let locked = self.query();
        state.last_checked = Some(now);
        state.cached_locked = locked;
        locked
    }

    /// Whether the next [`Self::is_locked`] call would query the provider.
    pub fn freshness(&self) -> Freshness {
        let now = self.clock.now();
        Self::freshness_at(&self.state(), now, self.config.debounce)
    }

    /// Drop the cached answer so the next [`Self::is_locked`] call queries.
    pub fn invalidate(&self) {
        self.state().last_checked = None;
    }

    /// Ask the provider directly, bypassing the cache. Blocks.
    ///
    /// Anything other than a single record that says "checked out in this
    /// session" counts as locked.
    pub fn query(&self) -> bool {
        let Some(provider) = &self.provider else {
            return false;
        };
        if !provider.is_enabled() || !provider.supports_checkout() {
            return false;
        }

        let records = match provider.status_of(&self.config.manifest_path) {
            Ok(records) => records,
            Err(e) => {
                warn!(path = %self.config.manifest_path, error = %e, "lock status query failed, treating manifest as read-only");
                return true;
            }
        };
        let locked = match records.as_slice() {
            [record] => !record.is_checked_out_locally(),
            _ => {
                warn!(
                    path = %self.config.manifest_path,
                    records = records.len(),
                    "ambiguous lock status, treating manifest as read-only"
                );
                true
            }
        };
        debug!(path = %self.config.manifest_path, locked, "queried lock status");
        locked
    }

    fn freshness_at(state: &GateState, now: Duration, debounce: Duration) -> Freshness {
        match state.last_checked {
            Some(at) if now.saturating_sub(at) <= debounce => Freshness::Fresh,
            _ => Freshness::Stale,
        }
    }

    fn state(&self) -> MutexGuard<'_, GateState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::ManualClock;
    use crate::error::{GateError, GateResult};
    use crate::provider::{AssetState, StatusRecord};
    use std::sync::atomic::{AtomicUsize, Ordering};

    /// Provider returning a fixed answer and counting queries.
    struct ScriptedProvider {
        enabled: bool,
        checkout: bool,
        records: Mutex<GateResult<Vec<StatusRecord>>>,
        queries: AtomicUsize,
    }

    impl ScriptedProvider {
        fn new(records: Vec<StatusRecord>) -> Self {
            Self {
                enabled: true,
                checkout: true,
                records: Mutex::new(Ok(records)),
                queries: AtomicUsize::new(0),
            }
        }

        fn checked_out() -> Self {
            Self::new(vec![StatusRecord::new("m", vec![AssetState::CheckedOutLocal])])
        }

        fn set_records(&self, records: Vec<StatusRecord>) {
            *self.records.lock().unwrap() = Ok(records);
        }

        fn queries(&self) -> usize {
            self.queries.load(Ordering::SeqCst)
        }
    }

    impl LockStatusProvider for ScriptedProvider {
        fn is_enabled(&self) -> bool {
            self.enabled
        }

        fn supports_checkout(&self) -> bool {
            self.checkout
        }

        fn status_of(&self, _path: &str) -> GateResult<Vec<StatusRecord>> {
            self.queries.fetch_add(1, Ordering::SeqCst);
            match &*self.records.lock().unwrap() {
                Ok(records) => Ok(records.clone()),
                Err(e) => Err(GateError::Provider(e.to_string())),
            }
        }
    }

    fn gate_with(provider: Arc<ScriptedProvider>) -> (Arc<ManualClock>, ReadOnlyGate) {
        let clock = Arc::new(ManualClock::new());
        let provider: Arc<dyn LockStatusProvider> = provider;
        let gate = ReadOnlyGate::with_clock(GateConfig::default(), Some(provider), clock.clone());
        (clock, gate)
    }

    // ---- query rules ----

    #[test]
    fn no_provider_is_unlocked() {
        let gate = ReadOnlyGate::new(GateConfig::default(), None);
        assert!(!gate.is_locked());
    }

    #[test]
    fn disabled_provider_is_unlocked_without_query() {
        let mut provider = ScriptedProvider::new(Vec::new());
        provider.enabled = false;
        let provider = Arc::new(provider);
        let (_, gate) = gate_with(provider.clone());
        assert!(!gate.query());
        assert_eq!(provider.queries(), 0);
    }

    #[test]
    fn provider_without_checkout_is_unlocked() {
        let mut provider = ScriptedProvider::new(Vec::new());
        provider.checkout = false;
        let (_, gate) = gate_with(Arc::new(provider));
        assert!(!gate.query());
    }

    #[test]
    fn zero_or_many_records_is_locked() {
        let provider = Arc::new(ScriptedProvider::new(Vec::new()));
        let (_, gate) = gate_with(provider.clone());
        assert!(gate.query());

        provider.set_records(vec![
            StatusRecord::new("m", vec![AssetState::CheckedOutLocal]),
            StatusRecord::new("m", vec![AssetState::CheckedOutLocal]),
        ]);
        assert!(gate.query());
    }

    #[test]
    fn checked_out_locally_is_unlocked() {
        let (_, gate) = gate_with(Arc::new(ScriptedProvider::checked_out()));
        assert!(!gate.query());
    }

    #[test]
    fn checked_out_elsewhere_is_locked() {
        let provider = ScriptedProvider::new(vec![StatusRecord::new(
            "m",
            vec![AssetState::Synced, AssetState::CheckedOutRemote],
        )]);
        let (_, gate) = gate_with(Arc::new(provider));
        assert!(gate.query());
    }

    #[test]
    fn provider_error_is_locked() {
        let provider = ScriptedProvider::checked_out();
        *provider.records.lock().unwrap() = Err(GateError::Provider("offline".into()));
        let (_, gate) = gate_with(Arc::new(provider));
        assert!(gate.query());
    }

    // ---- debounce ----

    #[test]
    fn calls_within_window_query_once() {
        let provider = Arc::new(ScriptedProvider::checked_out());
        let (clock, gate) = gate_with(provider.clone());

        assert_eq!(gate.freshness(), Freshness::Stale);
        assert!(!gate.is_locked());
        clock.advance(Duration::from_secs(1));
        assert!(!gate.is_locked());

        assert_eq!(provider.queries(), 1);
        assert_eq!(gate.freshness(), Freshness::Fresh);
    }

    #[test]
    fn calls_beyond_window_query_again() {
        let provider = Arc::new(ScriptedProvider::checked_out());
        let (clock, gate) = gate_with(provider.clone());

        gate.is_locked();
        clock.advance(Duration::from_secs(4));
        assert_eq!(gate.freshness(), Freshness::Stale);
        gate.is_locked();

        assert_eq!(provider.queries(), 2);
    }

    #[test]
    fn window_boundary_is_still_fresh() {
        let provider = Arc::new(ScriptedProvider::checked_out());
        let (clock, gate) = gate_with(provider.clone());

        gate.is_locked();
        clock.advance(Duration::from_secs(3));
        gate.is_locked();
        assert_eq!(provider.queries(), 1);
    }

    #[test]
    fn cached_answer_survives_provider_change_until_stale() {
        let provider = Arc::new(ScriptedProvider::checked_out());
        let (clock, gate) = gate_with(provider.clone());
        assert!(!gate.is_locked());

        provider.set_records(vec![StatusRecord::new("m", vec![AssetState::Synced])]);
        clock.advance(Duration::from_secs(2));
        assert!(!gate.is_locked());

        clock.advance(Duration::from_secs(2));
        assert!(gate.is_locked());
    }

    #[test]
    fn invalidate_forces_requery() {
        let provider = Arc::new(ScriptedProvider::checked_out());
        let (_, gate) = gate_with(provider.clone());

        gate.is_locked();
        gate.invalidate();
        assert_eq!(gate.freshness(), Freshness::Stale);
        gate.is_locked();
        assert_eq!(provider.queries(), 2);
    }
}
