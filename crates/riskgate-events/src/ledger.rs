//! Activity Ledger
//!
//! In-memory record of recent events, the sessions they opened, and the
//! running counters behind the dashboard.

use crate::error::LedgerError;
use crate::event::{EventAction, EventDraft, EventSource, EventType, SecurityEvent};
use crate::session::{Session, SessionStatus};
use parking_lot::{Mutex, RwLock};
use riskgate_engine::{RiskEngine, RiskInput, RiskLevel};
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;
use std::sync::atomic::{AtomicU64, Ordering};
use tracing::{debug, info, warn};

/// Events retained by default, newest first
pub const DEFAULT_EVENT_CAPACITY: usize = 100;
/// Sessions retained by default
pub const DEFAULT_SESSION_CAPACITY: usize = 1000;

/// Dashboard counters
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DashboardStats {
    pub total_logins: u64,
    pub active_sessions: u64,
    pub high_risk_logins: u64,
    pub blocked_attacks: u64,
    pub accounts_locked: u64,
    pub avg_risk_score: f64,
}

/// Event query; unset fields match everything
#[derive(Debug, Clone, Default)]
pub struct EventFilter {
    pub level: Option<RiskLevel>,
    pub event_type: Option<EventType>,
    pub action: Option<EventAction>,
    pub source: Option<EventSource>,
    pub unreviewed_only: bool,
    pub limit: Option<usize>,
}

impl EventFilter {
    fn matches(&self, event: &SecurityEvent) -> bool {
        self.level.map_or(true, |l| event.risk_level == l)
            && self.event_type.map_or(true, |t| event.event_type == t)
            && self.action.map_or(true, |a| event.action == a)
            && self.source.map_or(true, |s| event.source == s)
            && (!self.unreviewed_only || !event.reviewed)
    }
}

#[derive(Debug, Default)]
struct Counters {
    total_logins: AtomicU64,
    active_sessions: AtomicU64,
    high_risk_logins: AtomicU64,
    blocked_attacks: AtomicU64,
    accounts_locked: AtomicU64,
    scored_events: AtomicU64,
    score_sum: AtomicU64,
}

impl Counters {
    fn bump(counter: &AtomicU64) {
        counter.fetch_add(1, Ordering::Relaxed);
    }

    fn drop_one(counter: &AtomicU64) {
        let _ = counter.fetch_update(Ordering::Relaxed, Ordering::Relaxed, |n| n.checked_sub(1));
    }
}

/// Event and session store
pub struct ActivityLedger {
    engine: RiskEngine,
    capacity: usize,
    session_capacity: usize,
    events: RwLock<VecDeque<SecurityEvent>>,
    sessions: dashmap::DashMap<String, Session>,
    /// Session ids, oldest first
    session_order: Mutex<VecDeque<String>>,
    counters: Counters,
}

impl ActivityLedger {
    pub fn new() -> Self {
        Self::with_limits(DEFAULT_EVENT_CAPACITY, DEFAULT_SESSION_CAPACITY)
    }

    /// Ledger retaining at most `capacity` events and `capacity` sessions
    pub fn with_capacity(capacity: usize) -> Self {
        Self::with_limits(capacity, capacity)
    }

    pub fn with_limits(event_capacity: usize, session_capacity: usize) -> Self {
        Self {
            engine: RiskEngine::new(),
            capacity: event_capacity.max(1),
            session_capacity: session_capacity.max(1),
            events: RwLock::new(VecDeque::with_capacity(event_capacity)),
            sessions: dashmap::DashMap::new(),
            session_order: Mutex::new(VecDeque::new()),
            counters: Counters::default(),
        }
    }

    /// Score `input` and record the resulting event
    pub fn ingest(&self, draft: EventDraft, input: &RiskInput) -> (SecurityEvent, Option<Session>) {
        let verdict = self.engine.evaluate(input);
        let event = SecurityEvent::from_verdict(draft, &verdict);
        let session = self.record(event.clone());
        (event, session)
    }

    /// Record an already-scored event. Login events open a session, which
    /// is returned.
    pub fn record(&self, event: SecurityEvent) -> Option<Session> {
        let c = &self.counters;
        Counters::bump(&c.scored_events);
        c.score_sum.fetch_add(event.risk_score.value() as u64, Ordering::Relaxed);

        if event.action.is_denial() {
            Counters::bump(&c.blocked_attacks);
        }
        if event.action == EventAction::Locked {
            Counters::bump(&c.accounts_locked);
        }

        let session = if event.event_type.is_login() {
            Counters::bump(&c.total_logins);
            if event.is_high_risk() {
                Counters::bump(&c.high_risk_logins);
            }

            let session = Session::from_event(&event);
            if session.status == SessionStatus::Active {
                Counters::bump(&c.active_sessions);
            }
            self.sessions.insert(session.id.clone(), session.clone());
            self.retain_sessions(session.id.clone());
            Some(session)
        } else {
            None
        };

        if event.is_high_risk() {
            warn!(
                event = %event.id,
                user = %event.user.id,
                score = %event.risk_score,
                action = ?event.action,
                "High risk event"
            );
        } else {
            debug!(event = %event.id, user = %event.user.id, score = %event.risk_score, "Event recorded");
        }

        let mut events = self.events.write();
        events.push_front(event);
        events.truncate(self.capacity);

        session
    }

    /// Track `new_id` and evict past the session capacity: the oldest closed
    /// session goes first, then the oldest of any status.
    fn retain_sessions(&self, new_id: String) {
        let mut order = self.session_order.lock();
        order.push_back(new_id);

        while self.sessions.len() > self.session_capacity {
            let victim = order
                .iter()
                .position(|id| self.sessions.get(id).map_or(true, |s| s.status.is_closed()))
                .unwrap_or(0);
            let Some(id) = order.remove(victim) else {
                break;
            };
            if let Some((_, session)) = self.sessions.remove(&id) {
                if session.status == SessionStatus::Active {
                    Counters::drop_one(&self.counters.active_sessions);
                }
                debug!(session = %id, status = %session.status, "Session evicted");
            }
        }
    }

    /// Move a session to `status`, keeping the counters in step
    pub fn update_session_status(
        &self,
        session_id: &str,
        status: SessionStatus,
    ) -> Result<Session, LedgerError> {
        let mut session = self
            .sessions
            .get_mut(session_id)
            .ok_or_else(|| LedgerError::SessionNotFound(session_id.to_string()))?;

        let previous = session.status;
        if previous == status {
            return Ok(session.clone());
        }

        let c = &self.counters;
        if previous == SessionStatus::Active {
            Counters::drop_one(&c.active_sessions);
        }
        if status == SessionStatus::Active {
            Counters::bump(&c.active_sessions);
        }
        if previous == SessionStatus::Active && status.is_closed() {
            Counters::bump(&c.blocked_attacks);
        }

        session.status = status;
        session.last_active = chrono::Utc::now();
        info!(session = session_id, from = %previous, to = %status, "Session status changed");
        Ok(session.clone())
    }

    pub fn terminate_session(&self, session_id: &str) -> Result<Session, LedgerError> {
        self.update_session_status(session_id, SessionStatus::Terminated)
    }

    /// Flag an event as a false positive
    pub fn mark_false_positive(&self, event_id: &str) -> Result<SecurityEvent, LedgerError> {
        let (event, ()) = self.edit_event(event_id, |event| {
            event.is_false_positive = true;
            event.reviewed = true;
        })?;
        Ok(event)
    }

    /// Lock the account behind an event
    pub fn lock_event(&self, event_id: &str) -> Result<SecurityEvent, LedgerError> {
        let (event, newly_locked) = self.edit_event(event_id, |event| {
            let newly_locked = event.action != EventAction::Locked;
            event.action = EventAction::Locked;
            event.reviewed = true;
            newly_locked
        })?;

        if newly_locked {
            Counters::bump(&self.counters.accounts_locked);
            info!(event = event_id, user = %event.user.id, "Account locked");
        }
        Ok(event)
    }

    fn edit_event<T>(
        &self,
        event_id: &str,
        edit: impl FnOnce(&mut SecurityEvent) -> T,
    ) -> Result<(SecurityEvent, T), LedgerError> {
        let mut events = self.events.write();
        let event = events
            .iter_mut()
            .find(|e| e.id == event_id)
            .ok_or_else(|| LedgerError::EventNotFound(event_id.to_string()))?;
        let out = edit(event);
        Ok((event.clone(), out))
    }

    /// Retained events matching `filter`, newest first
    pub fn events(&self, filter: &EventFilter) -> Vec<SecurityEvent> {
        let events = self.events.read();
        events
            .iter()
            .filter(|e| filter.matches(e))
            .take(filter.limit.unwrap_or(usize::MAX))
            .cloned()
            .collect()
    }

    /// All sessions, newest first
    pub fn sessions(&self) -> Vec<Session> {
        let mut sessions: Vec<Session> = self.sessions.iter().map(|s| s.clone()).collect();
        sessions.sort_by(|a, b| b.started_at.cmp(&a.started_at));
        sessions
    }

    /// Sessions with any risk, highest score first
    pub fn risky_sessions(&self) -> Vec<Session> {
        let mut sessions: Vec<Session> = self
            .sessions
            .iter()
            .filter(|s| s.risk_score.value() > 0)
            .map(|s| s.clone())
            .collect();
        sessions.sort_by(|a, b| b.risk_score.cmp(&a.risk_score));
        sessions
    }

    pub fn session(&self, session_id: &str) -> Option<Session> {
        self.sessions.get(session_id).map(|s| s.clone())
    }

    pub fn stats(&self) -> DashboardStats {
        let c = &self.counters;
        let scored = c.scored_events.load(Ordering::Relaxed);
        let avg_risk_score = if scored == 0 {
            0.0
        } else {
            c.score_sum.load(Ordering::Relaxed) as f64 / scored as f64
        };

        DashboardStats {
            total_logins: c.total_logins.load(Ordering::Relaxed),
            active_sessions: c.active_sessions.load(Ordering::Relaxed),
            high_risk_logins: c.high_risk_logins.load(Ordering::Relaxed),
            blocked_attacks: c.blocked_attacks.load(Ordering::Relaxed),
            accounts_locked: c.accounts_locked.load(Ordering::Relaxed),
            avg_risk_score,
        }
    }
}

impl Default for ActivityLedger {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::event::tests::{critical_input, draft};

    fn medium_input() -> RiskInput {
        RiskInput { is_new_device: true, ..Default::default() }
    }

    #[test]
    fn test_ingest_login_opens_session() {
        let ledger = ActivityLedger::new();
        let (event, session) = ledger.ingest(draft(EventType::LoginSuccess), &medium_input());

        let session = session.unwrap();
        assert_eq!(event.risk_score.value(), 35);
        assert_eq!(session.status, SessionStatus::Active);
        assert_eq!(ledger.sessions().len(), 1);

        let stats = ledger.stats();
        assert_eq!(stats.total_logins, 1);
        assert_eq!(stats.active_sessions, 1);
        assert_eq!(stats.high_risk_logins, 0);
        assert_eq!(stats.avg_risk_score, 35.0);
    }

    #[test]
    fn test_non_login_event_has_no_session() {
        let ledger = ActivityLedger::new();
        let (_, session) = ledger.ingest(draft(EventType::ApiAccess), &RiskInput::default());
        assert!(session.is_none());
        assert!(ledger.sessions().is_empty());
        assert_eq!(ledger.stats().total_logins, 0);
    }

    #[test]
    fn test_critical_failed_login_locks() {
        let ledger = ActivityLedger::new();
        let (event, session) = ledger.ingest(draft(EventType::LoginFailed), &critical_input());
        assert_eq!(event.action, EventAction::Locked);
        assert_eq!(session.unwrap().status, SessionStatus::Blocked);

        let stats = ledger.stats();
        assert_eq!(stats.active_sessions, 0);
        assert_eq!(stats.high_risk_logins, 1);
        assert_eq!(stats.blocked_attacks, 1);
        assert_eq!(stats.accounts_locked, 1);
        assert_eq!(ledger.risky_sessions()[0].risk_score.value(), 90);
    }

    #[test]
    fn test_capacity_keeps_newest() {
        let ledger = ActivityLedger::with_capacity(3);
        for _ in 0..5 {
            ledger.ingest(draft(EventType::ApiAccess), &RiskInput::default());
        }
        let (latest, _) = ledger.ingest(draft(EventType::Logout), &RiskInput::default());

        let events = ledger.events(&EventFilter::default());
        assert_eq!(events.len(), 3);
        assert_eq!(events[0].id, latest.id);
        // Counters are not bounded by retention
        assert_eq!(ledger.stats().avg_risk_score, 10.0);
    }

    #[test]
    fn test_terminate_session_updates_counters() {
        let ledger = ActivityLedger::new();
        let (_, session) = ledger.ingest(draft(EventType::LoginSuccess), &RiskInput::default());
        let id = session.unwrap().id;

        let terminated = ledger.terminate_session(&id).unwrap();
        assert_eq!(terminated.status, SessionStatus::Terminated);
        let stats = ledger.stats();
        assert_eq!(stats.active_sessions, 0);
        assert_eq!(stats.blocked_attacks, 1);

        // Repeating is a no-op
        ledger.terminate_session(&id).unwrap();
        assert_eq!(ledger.stats().blocked_attacks, 1);

        ledger.update_session_status(&id, SessionStatus::Active).unwrap();
        assert_eq!(ledger.stats().active_sessions, 1);
    }

    #[test]
    fn test_sessions_are_bounded() {
        let ledger = ActivityLedger::with_capacity(3);
        for _ in 0..50 {
            ledger.ingest(draft(EventType::LoginSuccess), &RiskInput::default());
        }

        assert_eq!(ledger.events(&EventFilter::default()).len(), 3);
        assert_eq!(ledger.sessions().len(), 3);
        let stats = ledger.stats();
        assert_eq!(stats.total_logins, 50);
        assert_eq!(stats.active_sessions, 3);
    }

    #[test]
    fn test_eviction_prefers_closed_sessions() {
        let ledger = ActivityLedger::with_limits(10, 3);
        let ids: Vec<String> = (0..3)
            .map(|_| {
                let (_, session) = ledger.ingest(draft(EventType::LoginSuccess), &RiskInput::default());
                session.unwrap().id
            })
            .collect();
        ledger.terminate_session(&ids[1]).unwrap();

        ledger.ingest(draft(EventType::LoginSuccess), &RiskInput::default());

        assert!(ledger.session(&ids[0]).is_some());
        assert!(ledger.session(&ids[1]).is_none());
        assert!(ledger.session(&ids[2]).is_some());
        assert_eq!(ledger.sessions().len(), 3);
        assert_eq!(ledger.stats().active_sessions, 3);
    }

    #[test]
    fn test_challenge_is_not_a_block() {
        let ledger = ActivityLedger::new();
        let (_, session) = ledger.ingest(draft(EventType::LoginSuccess), &RiskInput::default());
        let id = session.unwrap().id;

        let challenged = ledger.update_session_status(&id, SessionStatus::Challenged).unwrap();
        assert_eq!(challenged.status, SessionStatus::Challenged);
        assert_eq!(ledger.session(&id).unwrap().status, SessionStatus::Challenged);

        let stats = ledger.stats();
        assert_eq!(stats.active_sessions, 0);
        assert_eq!(stats.blocked_attacks, 0);
    }

    #[test]
    fn test_concurrent_ingest_keeps_counters_consistent() {
        let ledger = ActivityLedger::new();
        let threads = 8;
        let per_thread = 50;

        std::thread::scope(|scope| {
            for _ in 0..threads {
                scope.spawn(|| {
                    for i in 0..per_thread {
                        if i % 2 == 0 {
                            ledger.ingest(draft(EventType::LoginSuccess), &RiskInput::default());
                        } else {
                            ledger.ingest(draft(EventType::LoginFailed), &critical_input());
                        }
                    }
                });
            }
        });

        let total = (threads * per_thread) as u64;
        let stats = ledger.stats();
        assert_eq!(stats.total_logins, total);
        assert_eq!(stats.active_sessions, total / 2);
        assert_eq!(stats.high_risk_logins, total / 2);
        assert_eq!(stats.blocked_attacks, total / 2);
        assert_eq!(stats.accounts_locked, total / 2);
        // (10 + 90) / 2
        assert_eq!(stats.avg_risk_score, 50.0);
        assert_eq!(ledger.sessions().len(), total as usize);
        assert_eq!(ledger.events(&EventFilter::default()).len(), DEFAULT_EVENT_CAPACITY);
    }

    #[test]
    fn test_unknown_ids() {
        let ledger = ActivityLedger::new();
        assert_eq!(
            ledger.terminate_session("sess_missing").unwrap_err(),
            LedgerError::SessionNotFound("sess_missing".into())
        );
        assert_eq!(
            ledger.lock_event("evt_missing").unwrap_err(),
            LedgerError::EventNotFound("evt_missing".into())
        );
    }

    #[test]
    fn test_review_actions() {
        let ledger = ActivityLedger::new();
        let (event, _) = ledger.ingest(draft(EventType::LoginSuccess), &medium_input());

        let flagged = ledger.mark_false_positive(&event.id).unwrap();
        assert!(flagged.is_false_positive);
        assert!(flagged.reviewed);

        let locked = ledger.lock_event(&event.id).unwrap();
        assert_eq!(locked.action, EventAction::Locked);
        ledger.lock_event(&event.id).unwrap();
        assert_eq!(ledger.stats().accounts_locked, 1);
    }

    #[test]
    fn test_event_filter() {
        let ledger = ActivityLedger::new();
        ledger.ingest(draft(EventType::LoginSuccess), &RiskInput::default());
        ledger.ingest(draft(EventType::LoginSuccess), &critical_input());
        let (reviewed, _) = ledger.ingest(draft(EventType::ApiAccess), &critical_input());
        ledger.mark_false_positive(&reviewed.id).unwrap();

        let critical = ledger.events(&EventFilter {
            level: Some(RiskLevel::Critical),
            ..Default::default()
        });
        assert_eq!(critical.len(), 2);

        let open = ledger.events(&EventFilter {
            level: Some(RiskLevel::Critical),
            unreviewed_only: true,
            ..Default::default()
        });
        assert_eq!(open.len(), 1);

        let api = ledger.events(&EventFilter {
            source: Some(EventSource::Api),
            ..Default::default()
        });
        assert!(api.is_empty());

        let one = ledger.events(&EventFilter { limit: Some(1), ..Default::default() });
        assert_eq!(one[0].id, reviewed.id);
    }

    #[test]
    fn test_ledger_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<ActivityLedger>();
    }
}
