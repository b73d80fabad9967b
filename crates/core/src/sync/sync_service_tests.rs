use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use chrono::{NaiveDate, Utc};
use rust_decimal_macros::dec;
use tokio::sync::Notify;

use crate::checkins::{CheckInRecord, CheckInStoreTrait, UserStats};
use crate::errors::{DatabaseError, Error, Result};
use crate::sync::{
    ConnectivityMonitor, ConnectivityProbeTrait, NewPendingCheckIn, PendingCheckIn, SyncRunState,
    SyncQueueRepositoryTrait, SyncService, SyncServiceTrait,
};

// ============== Mocks ==============

#[derive(Default)]
struct ReplayRemote {
    records: Mutex<Vec<CheckInRecord>>,
    available: AtomicBool,
    /// When set, every write blocks until `release` is notified.
    gate: Option<Arc<Notify>>,
    started: Option<Arc<Notify>>,
}

impl ReplayRemote {
    fn new(available: bool) -> Self {
        ReplayRemote {
            available: AtomicBool::new(available),
            ..Default::default()
        }
    }
}

#[async_trait]
impl CheckInStoreTrait for ReplayRemote {
    async fn get_user_stats(&self, _user_id: &str) -> Result<Option<UserStats>> {
        Ok(None)
    }

    async fn record_check_in(&self, record: &CheckInRecord, _stats: &UserStats) -> Result<()> {
        if let Some(started) = &self.started {
            started.notify_one();
        }
        if let Some(gate) = &self.gate {
            gate.notified().await;
        }
        if !self.available.load(Ordering::SeqCst) {
            return Err(Error::RemoteUnavailable("connection refused".to_string()));
        }
        let mut records = self.records.lock().unwrap();
        if records
            .iter()
            .any(|r| r.user_id == record.user_id && r.checked_on == record.checked_on)
        {
            return Err(Error::Database(DatabaseError::UniqueViolation(
                "check_ins.user_id, check_ins.checked_on".to_string(),
            )));
        }
        records.push(record.clone());
        Ok(())
    }

    async fn list_check_ins(&self, _user_id: &str, _limit: i64) -> Result<Vec<CheckInRecord>> {
        Ok(Vec::new())
    }
}

#[derive(Default)]
struct MemoryQueue {
    items: Mutex<Vec<PendingCheckIn>>,
    dropped: Mutex<Vec<(i64, String)>>,
    next_sequence: AtomicUsize,
}

impl SyncQueueRepositoryTrait for MemoryQueue {
    fn enqueue(&self, item: NewPendingCheckIn) -> Result<PendingCheckIn> {
        let sequence = self.next_sequence.fetch_add(1, Ordering::SeqCst) as i64 + 1;
        let pending = PendingCheckIn {
            sequence,
            user_id: item.user_id,
            check_in: item.check_in,
            stats: item.stats,
            enqueued_at: item.enqueued_at,
        };
        self.items.lock().unwrap().push(pending.clone());
        Ok(pending)
    }

    fn pending(&self) -> Result<Vec<PendingCheckIn>> {
        let mut items = self.items.lock().unwrap().clone();
        items.sort_by_key(|item| item.sequence);
        Ok(items)
    }

    fn remove(&self, sequence: i64) -> Result<()> {
        self.items
            .lock()
            .unwrap()
            .retain(|item| item.sequence != sequence);
        Ok(())
    }

    fn mark_dropped(&self, sequence: i64, reason: &str) -> Result<()> {
        self.remove(sequence)?;
        self.dropped
            .lock()
            .unwrap()
            .push((sequence, reason.to_string()));
        Ok(())
    }

    fn pending_count(&self) -> Result<i64> {
        Ok(self.items.lock().unwrap().len() as i64)
    }
}

struct StaticProbe {
    online: AtomicBool,
    calls: AtomicUsize,
}

impl StaticProbe {
    fn new(online: bool) -> Self {
        StaticProbe {
            online: AtomicBool::new(online),
            calls: AtomicUsize::new(0),
        }
    }
}

#[async_trait]
impl ConnectivityProbeTrait for StaticProbe {
    async fn probe(&self) -> bool {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.online.load(Ordering::SeqCst)
    }
}

// ============== Helpers ==============

fn record(user_id: &str, checked_on: NaiveDate) -> CheckInRecord {
    CheckInRecord {
        id: format!("{}-{}", user_id, checked_on),
        user_id: user_id.to_string(),
        checked_on,
        mood_value: 3,
        note: None,
        points_awarded: 10,
        streak_at_check_in: 1,
        multiplier_applied: dec!(1.0),
        created_at: Utc::now(),
    }
}

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn enqueue(queue: &MemoryQueue, user_id: &str, checked_on: NaiveDate) {
    queue
        .enqueue(NewPendingCheckIn {
            user_id: user_id.to_string(),
            check_in: record(user_id, checked_on),
            stats: UserStats::new(user_id),
            enqueued_at: Utc::now(),
        })
        .unwrap();
}

fn make_service(
    remote: Arc<ReplayRemote>,
    queue: Arc<MemoryQueue>,
    probe: Arc<StaticProbe>,
) -> SyncService {
    let monitor = Arc::new(ConnectivityMonitor::with_ttl(
        probe,
        Duration::from_secs(0),
    ));
    SyncService::new(remote, queue, monitor)
}

// ============== Tests ==============

#[tokio::test]
async fn test_replays_queue_in_fifo_order() {
    let remote = Arc::new(ReplayRemote::new(true));
    let queue = Arc::new(MemoryQueue::default());
    enqueue(&queue, "user-1", date(2026, 3, 1));
    enqueue(&queue, "user-1", date(2026, 3, 2));
    enqueue(&queue, "user-2", date(2026, 3, 2));

    let service = make_service(remote.clone(), queue.clone(), Arc::new(StaticProbe::new(true)));
    let summary = service.run_once().await.unwrap();

    assert_eq!(summary.state, SyncRunState::Completed);
    assert_eq!(summary.replayed, 3);
    assert_eq!(summary.dropped, 0);
    assert_eq!(summary.remaining, 0);

    // Replay preserved enqueue order
    let records = remote.records.lock().unwrap();
    assert_eq!(records[0].checked_on, date(2026, 3, 1));
    assert_eq!(records[1].checked_on, date(2026, 3, 2));
    assert_eq!(records[0].user_id, "user-1");
    assert_eq!(records[2].user_id, "user-2");
}

#[tokio::test]
async fn test_conflicting_item_is_dropped_with_audit_record() {
    let remote = Arc::new(ReplayRemote::new(true));
    // The remote already holds a check-in for this user and date
    remote
        .records
        .lock()
        .unwrap()
        .push(record("user-1", date(2026, 3, 1)));

    let queue = Arc::new(MemoryQueue::default());
    enqueue(&queue, "user-1", date(2026, 3, 1));
    enqueue(&queue, "user-2", date(2026, 3, 1));

    let service = make_service(remote.clone(), queue.clone(), Arc::new(StaticProbe::new(true)));
    let summary = service.run_once().await.unwrap();

    assert_eq!(summary.replayed, 1);
    assert_eq!(summary.dropped, 1);
    assert_eq!(summary.remaining, 0);

    let dropped = queue.dropped.lock().unwrap();
    assert_eq!(dropped.len(), 1);
    assert_eq!(dropped[0].0, 1);
    assert!(dropped[0].1.contains("Unique constraint"));
    // No duplicate was created on the remote side
    assert_eq!(remote.records.lock().unwrap().len(), 2);
}

#[tokio::test]
async fn test_unavailable_remote_keeps_queue_intact() {
    // Probe says online but every write fails: the drain stops at the first
    // item and nothing is lost.
    let remote = Arc::new(ReplayRemote::new(false));
    let queue = Arc::new(MemoryQueue::default());
    enqueue(&queue, "user-1", date(2026, 3, 1));
    enqueue(&queue, "user-1", date(2026, 3, 2));

    let service = make_service(remote, queue.clone(), Arc::new(StaticProbe::new(true)));
    let summary = service.run_once().await.unwrap();

    assert_eq!(summary.state, SyncRunState::Completed);
    assert_eq!(summary.replayed, 0);
    assert_eq!(summary.dropped, 0);
    assert_eq!(summary.remaining, 2);
    assert_eq!(queue.pending_count().unwrap(), 2);
}

#[tokio::test]
async fn test_offline_probe_skips_run() {
    let remote = Arc::new(ReplayRemote::new(true));
    let queue = Arc::new(MemoryQueue::default());
    enqueue(&queue, "user-1", date(2026, 3, 1));

    let service = make_service(remote, queue, Arc::new(StaticProbe::new(false)));
    let summary = service.run_once().await.unwrap();

    assert_eq!(summary.state, SyncRunState::Offline);
    assert_eq!(summary.remaining, 1);
}

#[tokio::test]
async fn test_empty_queue_never_probes() {
    let remote = Arc::new(ReplayRemote::new(true));
    let queue = Arc::new(MemoryQueue::default());
    let probe = Arc::new(StaticProbe::new(true));

    let service = make_service(remote, queue, probe.clone());
    let summary = service.run_once().await.unwrap();

    assert_eq!(summary.state, SyncRunState::Completed);
    assert_eq!(summary.remaining, 0);
    assert_eq!(probe.calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn test_concurrent_drains_are_mutually_exclusive() {
    let gate = Arc::new(Notify::new());
    let started = Arc::new(Notify::new());
    let remote = Arc::new(ReplayRemote {
        available: AtomicBool::new(true),
        gate: Some(gate.clone()),
        started: Some(started.clone()),
        ..Default::default()
    });
    let queue = Arc::new(MemoryQueue::default());
    enqueue(&queue, "user-1", date(2026, 3, 1));

    let service = Arc::new(make_service(
        remote,
        queue,
        Arc::new(StaticProbe::new(true)),
    ));

    let background = {
        let service = service.clone();
        tokio::spawn(async move { service.run_once().await })
    };
    // Wait until the first drain is inside its remote write
    started.notified().await;

    let summary = service.run_once().await.unwrap();
    assert_eq!(summary.state, SyncRunState::AlreadyRunning);

    gate.notify_one();
    let first = background.await.unwrap().unwrap();
    assert_eq!(first.state, SyncRunState::Completed);
    assert_eq!(first.replayed, 1);
}

#[tokio::test]
async fn test_status_reports_queue_depth() {
    let remote = Arc::new(ReplayRemote::new(true));
    let queue = Arc::new(MemoryQueue::default());
    enqueue(&queue, "user-1", date(2026, 3, 1));
    enqueue(&queue, "user-2", date(2026, 3, 1));

    let service = make_service(remote, queue, Arc::new(StaticProbe::new(true)));
    let status = service.status().await.unwrap();
    assert!(status.online);
    assert_eq!(status.pending, 2);
}
