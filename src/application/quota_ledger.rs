//! QuotaLedger - daily-reset balance gating the workspace actions.
//!
//! The ledger owns one [`QuotaState`] in memory and mirrors every change to
//! the `contract-tokens:v2` slot. It is shared behind `Arc`; each operation
//! performs its read-modify-write inside a single write-lock critical section,
//! so concurrent callers never interleave a debit with a reset.
//!
//! # Day boundary
//!
//! The balance is refilled on the first observation after local midnight:
//! at initialization, from the reset ticker, and before any debit. The
//! refill is idempotent within a day.

use std::sync::Arc;

use tokio::sync::RwLock;

use crate::domain::foundation::PeriodKey;
use crate::domain::quota::{
    ConsumeOutcome, PendingAction, PlanId, QuotaCatalog, QuotaError, QuotaSnapshot, QuotaState,
    RequestedAction,
};
use crate::ports::{Clock, KeyValueStore, PersistedSlot};

/// Storage key of the ledger record.
pub const QUOTA_STATE_KEY: &str = "contract-tokens:v2";

/// Quota ledger for a single subscriber.
pub struct QuotaLedger {
    slot: PersistedSlot<QuotaState>,
    clock: Arc<dyn Clock>,
    catalog: QuotaCatalog,
    state: RwLock<QuotaState>,
    pending: RwLock<Option<PendingAction>>,
}

impl QuotaLedger {
    /// Loads the persisted record, falling back to a fresh default-plan
    /// balance when it is missing or unreadable, then applies the day reset.
    ///
    /// Never fails: storage problems are logged and the ledger runs from
    /// memory.
    pub async fn initialize(
        store: Arc<dyn KeyValueStore>,
        clock: Arc<dyn Clock>,
        catalog: QuotaCatalog,
    ) -> Self {
        let slot = PersistedSlot::new(store, QUOTA_STATE_KEY);

        let state = match slot.load().await {
            Some(state) => state,
            None => {
                let fresh = QuotaState::fresh(catalog.default_plan, clock.today(), &catalog.plans);
                tracing::info!(
                    plan = %fresh.plan_id(),
                    remaining = fresh.remaining(),
                    "Starting fresh quota ledger"
                );
                slot.save(&fresh).await;
                fresh
            }
        };

        let ledger = Self {
            slot,
            clock,
            catalog,
            state: RwLock::new(state),
            pending: RwLock::new(None),
        };
        ledger.check_and_reset().await;
        ledger
    }

    pub fn catalog(&self) -> &QuotaCatalog {
        &self.catalog
    }

    /// Refills the balance if the calendar day changed. Returns true if it did.
    pub async fn check_and_reset(&self) -> bool {
        let today = self.clock.today();
        let mut state = self.state.write().await;
        self.reset_locked(&mut state, today).await
    }

    /// Whether `action` is affordable right now. Does not mutate anything.
    pub async fn can_perform(&self, action: impl Into<RequestedAction>) -> bool {
        let requested = action.into();
        let cost = self.catalog.cost_of(&requested);

        // Evaluate against the balance today would have, without applying it
        let mut view = *self.state.read().await;
        view.reset_if_stale(self.clock.today(), &self.catalog.plans);

        self.catalog
            .allotment(view.plan_id())
            .covers(view.remaining(), cost)
    }

    /// Debits `action`'s cost, all or nothing.
    ///
    /// On refusal the balance is untouched and the action is recorded as
    /// pending until [`clear_pending`](Self::clear_pending) or an upgrade.
    pub async fn consume(&self, action: impl Into<RequestedAction>) -> ConsumeOutcome {
        let requested = action.into();
        let today = self.clock.today();
        let mut state = self.state.write().await;
        self.reset_locked(&mut state, today).await;

        let Some(action) = requested.known() else {
            tracing::debug!(action = %requested, "Unknown action costs nothing");
            return ConsumeOutcome::Consumed {
                cost: 0,
                remaining: state.remaining(),
            };
        };

        let cost = self.catalog.actions.cost(action);
        let allotment = self.catalog.allotment(state.plan_id());

        match state.try_debit(cost, allotment) {
            Ok(remaining) => {
                if cost > 0 {
                    self.slot.save(&state).await;
                }
                tracing::debug!(action = %action, cost, remaining, "Consumed quota");
                ConsumeOutcome::Consumed { cost, remaining }
            }
            Err(insufficient) => {
                let pending = PendingAction {
                    action,
                    cost,
                    remaining: insufficient.remaining,
                    plan: state.plan_id(),
                };
                *self.pending.write().await = Some(pending);
                tracing::info!(
                    action = %action,
                    cost,
                    remaining = insufficient.remaining,
                    plan = %state.plan_id(),
                    "Quota exhausted, upgrade required"
                );
                ConsumeOutcome::UpgradeRequired(pending)
            }
        }
    }

    /// Switches to the plan named `plan_id`, refilling to its allotment.
    ///
    /// Unrecognized identifiers leave the ledger unchanged.
    pub async fn upgrade_plan(&self, plan_id: &str) -> Result<QuotaSnapshot, QuotaError> {
        let plan: PlanId = plan_id.parse().map_err(QuotaError::from)?;
        Ok(self.upgrade_to(plan).await)
    }

    /// Switches to `plan`, refilling to its allotment starting today.
    ///
    /// Applies from any current plan, including the same one.
    pub async fn upgrade_to(&self, plan: PlanId) -> QuotaSnapshot {
        let today = self.clock.today();
        let mut state = self.state.write().await;
        let previous = state.plan_id();

        state.upgrade(plan, today, &self.catalog.plans);
        self.slot.save(&state).await;
        *self.pending.write().await = None;

        tracing::info!(from = %previous, to = %plan, remaining = state.remaining(), "Plan changed");
        self.snapshot_of(&state)
    }

    /// Current balance for display, refilled first if the day changed.
    pub async fn snapshot(&self) -> QuotaSnapshot {
        let today = self.clock.today();
        let mut state = self.state.write().await;
        self.reset_locked(&mut state, today).await;
        self.snapshot_of(&state)
    }

    /// The last refused action, if the user has not dismissed it.
    pub async fn pending_action(&self) -> Option<PendingAction> {
        *self.pending.read().await
    }

    pub async fn clear_pending(&self) {
        *self.pending.write().await = None;
    }

    async fn reset_locked(&self, state: &mut QuotaState, today: PeriodKey) -> bool {
        let previous = state.period_key();
        if !state.reset_if_stale(today, &self.catalog.plans) {
            return false;
        }

        self.slot.save(state).await;
        tracing::info!(
            from = %previous,
            to = %today,
            plan = %state.plan_id(),
            remaining = state.remaining(),
            "Daily quota reset"
        );
        true
    }

    fn snapshot_of(&self, state: &QuotaState) -> QuotaSnapshot {
        QuotaSnapshot {
            remaining: state.remaining(),
            plan_id: state.plan_id(),
            allotment: self.catalog.allotment(state.plan_id()),
            period_key: state.period_key(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::{FixedClock, InMemoryKeyValueStore};
    use crate::domain::quota::{ActionId, Allotment};
    use chrono::NaiveDate;
    use proptest::prelude::*;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 10, 19).unwrap()
    }

    fn stored(remaining: u32, day: NaiveDate, plan: &str) -> String {
        format!(
            r#"{{"remaining": {}, "periodKey": "{}", "planId": "{}"}}"#,
            remaining,
            day.format("%Y-%m-%d"),
            plan
        )
    }

    async fn ledger_with(store: InMemoryKeyValueStore) -> (QuotaLedger, Arc<FixedClock>) {
        let clock = Arc::new(FixedClock::new(today()));
        let ledger =
            QuotaLedger::initialize(Arc::new(store), clock.clone(), QuotaCatalog::default()).await;
        (ledger, clock)
    }

    async fn persisted(store: &InMemoryKeyValueStore) -> QuotaState {
        let raw = store.read(QUOTA_STATE_KEY).await.unwrap().unwrap();
        serde_json::from_str(&raw).unwrap()
    }

    // ════════════════════════════════════════════════════════════════════════════
    // initialize / check_and_reset
    // ════════════════════════════════════════════════════════════════════════════

    #[tokio::test]
    async fn initialize_without_record_starts_free_and_persists() {
        let store = InMemoryKeyValueStore::new();
        let (ledger, _) = ledger_with(store.clone()).await;

        let snapshot = ledger.snapshot().await;
        assert_eq!(snapshot.plan_id, PlanId::Free);
        assert_eq!(snapshot.remaining, 10);
        assert_eq!(snapshot.period_key, PeriodKey::from_date(today()));
        assert_eq!(persisted(&store).await.remaining(), 10);
    }

    #[tokio::test]
    async fn initialize_with_corrupt_record_falls_back_to_default() {
        let store = InMemoryKeyValueStore::with_value(QUOTA_STATE_KEY, "}}not json");
        let (ledger, _) = ledger_with(store.clone()).await;

        let snapshot = ledger.snapshot().await;
        assert_eq!(snapshot.plan_id, PlanId::Free);
        assert_eq!(snapshot.remaining, 10);
        assert_eq!(persisted(&store).await.plan_id(), PlanId::Free);
    }

    #[tokio::test]
    async fn initialize_with_unknown_plan_falls_back_to_default() {
        let store =
            InMemoryKeyValueStore::with_value(QUOTA_STATE_KEY, stored(3, today(), "platinum"));
        let (ledger, _) = ledger_with(store).await;

        assert_eq!(ledger.snapshot().await.plan_id, PlanId::Free);
    }

    #[tokio::test]
    async fn initialize_ignores_superseded_flat_pool_key() {
        let store = InMemoryKeyValueStore::with_value("contract-tokens", "3");
        let (ledger, _) = ledger_with(store).await;

        assert_eq!(ledger.snapshot().await.remaining, 10);
    }

    #[tokio::test]
    async fn initialize_resets_yesterdays_record() {
        let yesterday = today().pred_opt().unwrap();
        let store = InMemoryKeyValueStore::with_value(QUOTA_STATE_KEY, stored(0, yesterday, "pro"));
        let (ledger, _) = ledger_with(store.clone()).await;

        let snapshot = ledger.snapshot().await;
        assert_eq!(snapshot.remaining, 200);
        assert_eq!(snapshot.period_key, PeriodKey::from_date(today()));
        assert_eq!(persisted(&store).await.remaining(), 200);
    }

    #[tokio::test]
    async fn initialize_keeps_todays_record() {
        let store = InMemoryKeyValueStore::with_value(QUOTA_STATE_KEY, stored(4, today(), "basic"));
        let (ledger, _) = ledger_with(store).await;

        let snapshot = ledger.snapshot().await;
        assert_eq!(snapshot.remaining, 4);
        assert_eq!(snapshot.plan_id, PlanId::Basic);
    }

    #[tokio::test]
    async fn check_and_reset_is_idempotent_within_a_day() {
        let (ledger, clock) = ledger_with(InMemoryKeyValueStore::new()).await;
        ledger.consume(ActionId::ExportPdf).await;

        clock.advance_days(1);
        assert!(ledger.check_and_reset().await);
        let first = ledger.snapshot().await;
        assert!(!ledger.check_and_reset().await);

        assert_eq!(ledger.snapshot().await, first);
        assert_eq!(first.remaining, 10);
    }

    // ════════════════════════════════════════════════════════════════════════════
    // can_perform / consume
    // ════════════════════════════════════════════════════════════════════════════

    #[tokio::test]
    async fn free_plan_exports_once_then_requires_upgrade() {
        let store = InMemoryKeyValueStore::new();
        let (ledger, _) = ledger_with(store.clone()).await;

        let first = ledger.consume(ActionId::ExportPdf).await;
        assert_eq!(first, ConsumeOutcome::Consumed { cost: 10, remaining: 0 });

        assert!(!ledger.can_perform(ActionId::ExportPdf).await);
        let second = ledger.consume(ActionId::ExportPdf).await;
        let pending = second.pending().copied().unwrap();
        assert_eq!(pending.action, ActionId::ExportPdf);
        assert_eq!(pending.cost, 10);
        assert_eq!(pending.remaining, 0);

        assert_eq!(ledger.snapshot().await.remaining, 0);
        assert_eq!(ledger.pending_action().await, Some(pending));
        assert_eq!(persisted(&store).await.remaining(), 0);
    }

    #[tokio::test]
    async fn zero_cost_action_leaves_balance() {
        let store = InMemoryKeyValueStore::with_value(QUOTA_STATE_KEY, stored(5, today(), "free"));
        let (ledger, _) = ledger_with(store).await;

        let outcome = ledger.consume(ActionId::SaveContract).await;
        assert_eq!(outcome, ConsumeOutcome::Consumed { cost: 0, remaining: 5 });
    }

    #[tokio::test]
    async fn unknown_action_is_free_even_at_zero() {
        let store = InMemoryKeyValueStore::with_value(QUOTA_STATE_KEY, stored(0, today(), "free"));
        let (ledger, _) = ledger_with(store).await;

        assert!(ledger.can_perform("share-link").await);
        assert!(ledger.consume("share-link").await.is_consumed());
        assert_eq!(ledger.pending_action().await, None);
    }

    #[tokio::test]
    async fn unlimited_plan_never_exhausts() {
        let (ledger, _) = ledger_with(InMemoryKeyValueStore::new()).await;
        ledger.upgrade_to(PlanId::Unlimited).await;

        for _ in 0..1000 {
            assert!(ledger.consume(ActionId::ExportPdf).await.is_consumed());
        }

        let snapshot = ledger.snapshot().await;
        assert_eq!(snapshot.allotment, Allotment::Unlimited);
        assert!(ledger.can_perform(ActionId::ExportPdf).await);
    }

    #[tokio::test]
    async fn consume_after_midnight_uses_refilled_balance() {
        let (ledger, clock) = ledger_with(InMemoryKeyValueStore::new()).await;
        ledger.consume(ActionId::ExportPdf).await;
        assert!(!ledger.can_perform(ActionId::ExportPdf).await);

        clock.advance_days(1);
        assert!(ledger.can_perform(ActionId::ExportPdf).await);
        assert!(ledger.consume(ActionId::ExportPdf).await.is_consumed());
        assert_eq!(
            ledger.snapshot().await.period_key,
            PeriodKey::from_date(today().succ_opt().unwrap())
        );
    }

    #[tokio::test]
    async fn can_perform_does_not_apply_reset() {
        let store = InMemoryKeyValueStore::new();
        let (ledger, clock) = ledger_with(store.clone()).await;
        clock.advance_days(1);

        ledger.can_perform(ActionId::ExportPdf).await;
        assert_eq!(persisted(&store).await.period_key(), PeriodKey::from_date(today()));
    }

    #[tokio::test]
    async fn snapshot_after_midnight_shows_refilled_balance() {
        let store = InMemoryKeyValueStore::new();
        let (ledger, clock) = ledger_with(store.clone()).await;
        ledger.consume(ActionId::ExportPdf).await;
        assert_eq!(ledger.snapshot().await.remaining, 0);

        clock.advance_days(1);
        let tomorrow = PeriodKey::from_date(today().succ_opt().unwrap());
        let snapshot = ledger.snapshot().await;
        assert_eq!(snapshot.remaining, 10);
        assert_eq!(snapshot.period_key, tomorrow);
        assert_eq!(persisted(&store).await.period_key(), tomorrow);
    }

    #[tokio::test]
    async fn clear_pending_dismisses_signal() {
        let store = InMemoryKeyValueStore::with_value(QUOTA_STATE_KEY, stored(0, today(), "free"));
        let (ledger, _) = ledger_with(store).await;

        ledger.consume(ActionId::ExportPdf).await;
        assert!(ledger.pending_action().await.is_some());

        ledger.clear_pending().await;
        assert!(ledger.pending_action().await.is_none());
    }

    // ════════════════════════════════════════════════════════════════════════════
    // upgrade_plan
    // ════════════════════════════════════════════════════════════════════════════

    #[tokio::test]
    async fn upgrade_to_pro_refills_and_persists() {
        let store = InMemoryKeyValueStore::with_value(QUOTA_STATE_KEY, stored(0, today(), "free"));
        let (ledger, _) = ledger_with(store.clone()).await;
        ledger.consume(ActionId::ExportPdf).await;

        let snapshot = ledger.upgrade_plan("pro").await.unwrap();

        assert_eq!(snapshot.plan_id, PlanId::Pro);
        assert_eq!(snapshot.remaining, 200);
        assert_eq!(snapshot.period_key, PeriodKey::from_date(today()));
        assert_eq!(ledger.pending_action().await, None);
        assert_eq!(persisted(&store).await.plan_id(), PlanId::Pro);
    }

    #[tokio::test]
    async fn downgrade_applies_without_carry_over() {
        let (ledger, _) = ledger_with(InMemoryKeyValueStore::new()).await;
        ledger.upgrade_to(PlanId::Pro).await;

        let snapshot = ledger.upgrade_plan("basic").await.unwrap();
        assert_eq!(snapshot.remaining, 50);
    }

    #[tokio::test]
    async fn unknown_plan_is_rejected_without_change() {
        let store = InMemoryKeyValueStore::with_value(QUOTA_STATE_KEY, stored(7, today(), "free"));
        let (ledger, _) = ledger_with(store.clone()).await;

        let err = ledger.upgrade_plan("gold").await.unwrap_err();

        assert_eq!(err, QuotaError::UnknownPlan("gold".to_string()));
        assert_eq!(err.to_string(), "unknown plan: gold");
        assert_eq!(ledger.snapshot().await.remaining, 7);
        assert_eq!(persisted(&store).await.remaining(), 7);
    }

    // ════════════════════════════════════════════════════════════════════════════
    // Properties
    // ════════════════════════════════════════════════════════════════════════════

    fn plan_strategy() -> impl Strategy<Value = PlanId> {
        prop_oneof![
            Just(PlanId::Free),
            Just(PlanId::Basic),
            Just(PlanId::Pro),
            Just(PlanId::Unlimited),
        ]
    }

    fn action_strategy() -> impl Strategy<Value = ActionId> {
        prop_oneof![
            Just(ActionId::SaveContract),
            Just(ActionId::LoadContract),
            Just(ActionId::ApplyTemplate),
            Just(ActionId::ExportPdf),
        ]
    }

    proptest! {
        #[test]
        fn consume_is_all_or_nothing(
            remaining in 0u32..300,
            plan in plan_strategy(),
            action in action_strategy(),
        ) {
            let runtime = tokio::runtime::Builder::new_current_thread().build().unwrap();
            runtime.block_on(async {
                let store = InMemoryKeyValueStore::with_value(
                    QUOTA_STATE_KEY,
                    stored(remaining, today(), plan.as_str()),
                );
                let (ledger, _) = ledger_with(store).await;
                let cost = ledger.catalog().actions.cost(action);
                let allowed = ledger.can_perform(action).await;

                let outcome = ledger.consume(action).await;
                let after = ledger.snapshot().await.remaining;

                assert_eq!(outcome.is_consumed(), allowed);
                if plan == PlanId::Unlimited {
                    assert!(outcome.is_consumed());
                } else if remaining >= cost {
                    assert_eq!(after, remaining - cost);
                } else {
                    assert_eq!(after, remaining);
                    assert!(ledger.pending_action().await.is_some());
                }
            });
        }
    }
}
