//! Shared fixtures for board integration tests: an in-memory activities
//! service with the real service's registration rules, a manual timer, and a
//! per-thread capture of `log` records.

#![allow(dead_code)]

use std::cell::{Cell, Ref, RefCell};
use std::rc::Rc;
use std::sync::Once;
use std::time::Duration;

use activity_board::board_sync::{ActivityBoard, StatusTimer};
use activity_board::config::BoardConfig;
use activity_board::net::api::{ActivitiesBackend, ApiError};
use activity_board::net::types::{Activity, ActivityDirectory};
use activity_board::state::board::BoardState;

// =============================================================
// In-memory service
// =============================================================

pub struct FakeService {
    activities: RefCell<Vec<(String, Activity)>>,
    offline: Cell<bool>,
    listing_broken: Cell<bool>,
    terse: Cell<bool>,
    blank_detail: Cell<bool>,
    list_calls: Cell<usize>,
    mutation_calls: Cell<usize>,
}

impl FakeService {
    pub fn empty() -> Self {
        Self {
            activities: RefCell::new(Vec::new()),
            offline: Cell::new(false),
            listing_broken: Cell::new(false),
            terse: Cell::new(false),
            blank_detail: Cell::new(false),
            list_calls: Cell::new(0),
            mutation_calls: Cell::new(0),
        }
    }

    /// The school's default catalogue.
    pub fn seeded() -> Self {
        Self::empty()
            .with_activity(
                "Chess Club",
                12,
                &["michael@mergington.edu", "daniel@mergington.edu"],
            )
            .with_activity(
                "Programming Class",
                20,
                &["emma@mergington.edu", "sophia@mergington.edu"],
            )
            .with_activity("Gym Class", 30, &["john@mergington.edu", "olivia@mergington.edu"])
    }

    pub fn with_activity(self, name: &str, max: i64, participants: &[&str]) -> Self {
        self.activities.borrow_mut().push((
            name.to_owned(),
            Activity {
                description: format!("{name} description"),
                schedule: "Fridays, 3:30 PM - 5:00 PM".to_owned(),
                max_participants: max,
                participants: participants.iter().map(|p| (*p).to_owned()).collect(),
            },
        ));
        self
    }

    pub fn set_offline(&self, offline: bool) {
        self.offline.set(offline);
    }

    pub fn set_listing_broken(&self, broken: bool) {
        self.listing_broken.set(broken);
    }

    /// Reject without a `detail` body, like a proxy error page would.
    pub fn set_terse(&self, terse: bool) {
        self.terse.set(terse);
    }

    /// Reject with `{"detail": ""}`.
    pub fn set_blank_detail(&self, blank: bool) {
        self.blank_detail.set(blank);
    }

    pub fn list_calls(&self) -> usize {
        self.list_calls.get()
    }

    pub fn mutation_calls(&self) -> usize {
        self.mutation_calls.get()
    }

    pub fn participants(&self, name: &str) -> Vec<String> {
        self.activities
            .borrow()
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, a)| a.participants.clone())
            .unwrap_or_default()
    }

    fn rejected(&self, status: u16, detail: &str) -> ApiError {
        let detail = if self.terse.get() {
            None
        } else if self.blank_detail.get() {
            Some(String::new())
        } else {
            Some(detail.to_owned())
        };
        ApiError::Rejected { status, detail }
    }

    fn check_online(&self) -> Result<(), ApiError> {
        if self.offline.get() {
            Err(ApiError::Transport("connection refused".to_owned()))
        } else {
            Ok(())
        }
    }
}

impl ActivitiesBackend for FakeService {
    async fn list_activities(&self) -> Result<ActivityDirectory, ApiError> {
        self.list_calls.set(self.list_calls.get() + 1);
        self.check_online()?;
        if self.listing_broken.get() {
            return Err(ApiError::Malformed("expected an object".to_owned()));
        }
        Ok(ActivityDirectory::from_entries(self.activities.borrow().clone()))
    }

    async fn signup(&self, activity: &str, email: &str) -> Result<String, ApiError> {
        self.mutation_calls.set(self.mutation_calls.get() + 1);
        self.check_online()?;
        let mut activities = self.activities.borrow_mut();
        let Some((_, entry)) = activities.iter_mut().find(|(n, _)| n == activity) else {
            return Err(self.rejected(404, "Activity not found"));
        };
        if entry.participants.iter().any(|p| p == email) {
            return Err(self.rejected(400, "Student is already signed up"));
        }
        if i64::try_from(entry.participants.len()).unwrap_or(i64::MAX) >= entry.max_participants {
            return Err(self.rejected(400, "Activity is full"));
        }
        entry.participants.push(email.to_owned());
        Ok(format!("Signed up {email} for {activity}"))
    }

    async fn unregister(&self, activity: &str, email: &str) -> Result<String, ApiError> {
        self.mutation_calls.set(self.mutation_calls.get() + 1);
        self.check_online()?;
        let mut activities = self.activities.borrow_mut();
        let Some((_, entry)) = activities.iter_mut().find(|(n, _)| n == activity) else {
            return Err(self.rejected(404, "Activity not found"));
        };
        let Some(index) = entry.participants.iter().position(|p| p == email) else {
            return Err(self.rejected(404, "Student is not signed up for this activity"));
        };
        entry.participants.remove(index);
        Ok(format!("Unregistered {email} from {activity}"))
    }
}

// =============================================================
// Manual timer
// =============================================================

struct Scheduled {
    after: Duration,
    cancelled: Rc<Cell<bool>>,
    task: Option<Box<dyn FnOnce()>>,
}

/// Records scheduled hides; tests decide when they fire.
#[derive(Clone, Default)]
pub struct ManualTimer {
    scheduled: Rc<RefCell<Vec<Scheduled>>>,
}

pub struct ManualHandle(Rc<Cell<bool>>);

impl Drop for ManualHandle {
    fn drop(&mut self) {
        self.0.set(true);
    }
}

impl StatusTimer for ManualTimer {
    type Handle = ManualHandle;

    fn schedule(&self, after: Duration, task: Box<dyn FnOnce()>) -> ManualHandle {
        let cancelled = Rc::new(Cell::new(false));
        self.scheduled.borrow_mut().push(Scheduled {
            after,
            cancelled: Rc::clone(&cancelled),
            task: Some(task),
        });
        ManualHandle(cancelled)
    }
}

impl ManualTimer {
    /// Durations of every hide ever scheduled, in order.
    pub fn durations(&self) -> Vec<Duration> {
        self.scheduled.borrow().iter().map(|s| s.after).collect()
    }

    /// Hides scheduled and neither fired nor cancelled.
    pub fn live(&self) -> usize {
        self.scheduled
            .borrow()
            .iter()
            .filter(|s| !s.cancelled.get() && s.task.is_some())
            .count()
    }

    /// Run the hide at `index` as if its deadline passed, unless cancelled.
    pub fn fire(&self, index: usize) {
        let task = {
            let mut scheduled = self.scheduled.borrow_mut();
            let slot = &mut scheduled[index];
            if slot.cancelled.get() { None } else { slot.task.take() }
        };
        if let Some(task) = task {
            task();
        }
    }

    /// Fire every scheduled hide in order.
    pub fn fire_all(&self) {
        let count = self.scheduled.borrow().len();
        for index in 0..count {
            self.fire(index);
        }
    }
}

// =============================================================
// Log capture
// =============================================================

thread_local! {
    static RECORDS: RefCell<Vec<(log::Level, String)>> = const { RefCell::new(Vec::new()) };
}

/// Routes every record to the emitting thread's buffer. Each test runs on its
/// own thread, so tests never see each other's records.
struct CaptureLogger;

impl log::Log for CaptureLogger {
    fn enabled(&self, _metadata: &log::Metadata<'_>) -> bool {
        true
    }

    fn log(&self, record: &log::Record<'_>) {
        RECORDS.with(|r| r.borrow_mut().push((record.level(), record.args().to_string())));
    }

    fn flush(&self) {}
}

static CAPTURE: CaptureLogger = CaptureLogger;
static INSTALL: Once = Once::new();

fn install_capture() {
    INSTALL.call_once(|| {
        log::set_logger(&CAPTURE).expect("no other logger in this test binary");
        log::set_max_level(log::LevelFilter::Trace);
    });
    RECORDS.with(|r| r.borrow_mut().clear());
}

// =============================================================
// Harness
// =============================================================

pub type TestBoard = ActivityBoard<FakeService, Rc<RefCell<BoardState>>, ManualTimer>;

pub struct Harness {
    pub board: TestBoard,
    pub store: Rc<RefCell<BoardState>>,
    pub timer: ManualTimer,
}

impl Harness {
    pub fn new(service: FakeService) -> Self {
        install_capture();
        let store = Rc::new(RefCell::new(BoardState::default()));
        let timer = ManualTimer::default();
        let board = ActivityBoard::new(service, Rc::clone(&store), timer.clone(), BoardConfig::default());
        Self { board, store, timer }
    }

    /// Harness that has already completed its initial load.
    pub fn loaded(service: FakeService) -> Self {
        let harness = Self::new(service);
        harness.load();
        harness
    }

    pub fn service(&self) -> &FakeService {
        self.board.backend()
    }

    pub fn state(&self) -> Ref<'_, BoardState> {
        self.store.borrow()
    }

    pub fn fill_form(&self, activity: &str, email: &str) {
        let mut state = self.store.borrow_mut();
        state.form.activity = activity.to_owned();
        state.form.email = email.to_owned();
    }

    pub fn load(&self) {
        futures::executor::block_on(self.board.load_and_render());
    }

    pub fn signup(&self, activity: &str, email: &str) {
        futures::executor::block_on(self.board.submit_signup(activity, email));
    }

    pub fn unregister(&self, activity: &str, email: &str) {
        futures::executor::block_on(self.board.submit_unregister(activity, email));
    }

    /// Warnings and errors logged on this thread since the harness was built.
    pub fn diagnostics(&self) -> Vec<(log::Level, String)> {
        RECORDS.with(|r| {
            r.borrow()
                .iter()
                .filter(|(level, _)| *level <= log::Level::Warn)
                .cloned()
                .collect()
        })
    }

    /// Drop the records captured so far.
    pub fn clear_diagnostics(&self) {
        RECORDS.with(|r| r.borrow_mut().clear());
    }

    pub fn emails_in(&self, activity: &str) -> Vec<String> {
        self.state()
            .activity(activity)
            .map(|entry| entry.participants.iter().map(|p| p.email.clone()).collect())
            .unwrap_or_default()
    }
}
