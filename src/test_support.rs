//! Scripted fakes for the controller's seams. Test builds only.

use std::cell::RefCell;
use std::collections::VecDeque;
use std::rc::Rc;
use std::time::Duration;

use async_trait::async_trait;
use futures::channel::oneshot;
use once_cell::sync::OnceCell;
use tracing_subscriber::{EnvFilter, fmt};

use crate::board::{BOARD_WIDTH, Board};
use crate::config::ClientConfig;
use crate::controller::TurnController;
use crate::display::DisplaySurface;
use crate::error::ClientError;
use crate::protocol::{AgentTurn, MoveVerdict, PlayerSetup, StateReply};
use crate::render::Marker;
use crate::service::GameService;
use crate::timer::Timer;
use crate::types::{GameSnapshot, MoveIntent, Outcome, PlayerColor, PlayerType, ScorePair};

static LOGGING: OnceCell<()> = OnceCell::new();

/// Idempotent subscriber for tests. `TEST_LOG` wins over `RUST_LOG`; default is quiet.
pub fn init_test_logging() {
    LOGGING.get_or_init(|| {
        let filter = std::env::var("TEST_LOG")
            .or_else(|_| std::env::var("RUST_LOG"))
            .map(EnvFilter::new)
            .unwrap_or_else(|_| EnvFilter::new("warn"));

        fmt()
            .with_env_filter(filter)
            .with_test_writer()
            .without_time()
            .try_init()
            .ok();
    });
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Call {
    FetchState,
    SubmitMove(MoveIntent),
    AgentMove,
    FetchOutcome,
    Reset,
    StartGame(PlayerSetup),
}

/// Everything observable, in the order it happened.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    Request(Call),
    Message(Option<String>),
    Sleep(Duration),
}

#[derive(Debug, Clone, Default)]
pub struct Journal(Rc<RefCell<Vec<Event>>>);

impl Journal {
    pub fn push(&self, event: Event) {
        self.0.borrow_mut().push(event);
    }

    pub fn events(&self) -> Vec<Event> {
        self.0.borrow().clone()
    }

    pub fn clear(&self) {
        self.0.borrow_mut().clear();
    }
}

type Scripted<V> = VecDeque<(Result<V, ClientError>, Option<StateReply>)>;

struct Script {
    state: Result<StateReply, ClientError>,
    moves: Scripted<MoveVerdict>,
    agent_moves: Scripted<AgentTurn>,
    outcome: Result<Outcome, ClientError>,
    reset: Result<(), ClientError>,
    start_game: Result<(), ClientError>,
}

/// Engine stand-in. Each scripted reply may replace the state later fetches see.
#[derive(Clone)]
pub struct FakeService {
    script: Rc<RefCell<Script>>,
    move_gate: Rc<RefCell<Option<Vec<oneshot::Sender<()>>>>>,
    journal: Journal,
}

impl FakeService {
    pub fn new(journal: &Journal) -> Self {
        Self {
            script: Rc::new(RefCell::new(Script {
                state: Err(ClientError::Transport("no state scripted".to_string())),
                moves: VecDeque::new(),
                agent_moves: VecDeque::new(),
                outcome: Err(ClientError::Transport("no outcome scripted".to_string())),
                reset: Ok(()),
                start_game: Ok(()),
            })),
            move_gate: Rc::default(),
            journal: journal.clone(),
        }
    }

    pub fn set_state(&self, state: StateReply) {
        self.script.borrow_mut().state = Ok(state);
    }

    pub fn fail_state(&self, err: ClientError) {
        self.script.borrow_mut().state = Err(err);
    }

    pub fn script_move(&self, reply: Result<MoveVerdict, ClientError>, then: Option<StateReply>) {
        self.script.borrow_mut().moves.push_back((reply, then));
    }

    pub fn script_agent(&self, reply: Result<AgentTurn, ClientError>, then: Option<StateReply>) {
        self.script.borrow_mut().agent_moves.push_back((reply, then));
    }

    pub fn set_outcome(&self, outcome: Result<Outcome, ClientError>) {
        self.script.borrow_mut().outcome = outcome;
    }

    pub fn set_reset(&self, reply: Result<(), ClientError>) {
        self.script.borrow_mut().reset = reply;
    }

    pub fn set_start_game(&self, reply: Result<(), ClientError>) {
        self.script.borrow_mut().start_game = reply;
    }

    /// Parks every following move submission until `release_moves`.
    pub fn hold_moves(&self) {
        self.move_gate.borrow_mut().get_or_insert_with(Vec::new);
    }

    pub fn release_moves(&self) {
        for tx in self.move_gate.borrow_mut().take().into_iter().flatten() {
            let _ = tx.send(());
        }
    }

    /// Requests recorded since the journal was last cleared.
    pub fn calls(&self) -> Vec<Call> {
        self.journal
            .events()
            .into_iter()
            .filter_map(|e| match e {
                Event::Request(call) => Some(call),
                _ => None,
            })
            .collect()
    }

    pub fn count(&self, call: &Call) -> usize {
        self.calls().iter().filter(|c| *c == call).count()
    }

    fn next<V>(&self, pick: impl FnOnce(&mut Script) -> &mut Scripted<V>) -> Result<V, ClientError> {
        let mut script = self.script.borrow_mut();
        let Some((reply, then)) = pick(&mut *script).pop_front() else {
            return Err(ClientError::Transport("no reply scripted".to_string()));
        };
        if let Some(state) = then {
            script.state = Ok(state);
        }
        reply
    }
}

#[async_trait(?Send)]
impl GameService for FakeService {
    async fn fetch_state(&self) -> Result<StateReply, ClientError> {
        self.journal.push(Event::Request(Call::FetchState));
        self.script.borrow().state.clone()
    }

    async fn submit_move(&self, intent: MoveIntent) -> Result<MoveVerdict, ClientError> {
        self.journal.push(Event::Request(Call::SubmitMove(intent)));
        let held = self.move_gate.borrow_mut().as_mut().map(|waiting| {
            let (tx, rx) = oneshot::channel();
            waiting.push(tx);
            rx
        });
        if let Some(rx) = held {
            let _ = rx.await;
        }
        self.next(|s| &mut s.moves)
    }

    async fn request_agent_move(&self) -> Result<AgentTurn, ClientError> {
        self.journal.push(Event::Request(Call::AgentMove));
        self.next(|s| &mut s.agent_moves)
    }

    async fn fetch_outcome(&self) -> Result<Outcome, ClientError> {
        self.journal.push(Event::Request(Call::FetchOutcome));
        self.script.borrow().outcome.clone()
    }

    async fn reset(&self) -> Result<(), ClientError> {
        self.journal.push(Event::Request(Call::Reset));
        self.script.borrow().reset.clone()
    }

    async fn start_game(&self, setup: PlayerSetup) -> Result<(), ClientError> {
        self.journal.push(Event::Request(Call::StartGame(setup)));
        self.script.borrow().start_game.clone()
    }
}

#[derive(Debug, Default)]
struct Screen {
    cells: [[Marker; BOARD_WIDTH]; BOARD_WIDTH],
    labels: (String, String),
    message: Option<String>,
    cell_writes: usize,
    score_writes: usize,
}

#[derive(Debug, Clone, Default)]
pub struct RecordingDisplay {
    screen: Rc<RefCell<Screen>>,
    journal: Journal,
}

impl RecordingDisplay {
    pub fn new(journal: &Journal) -> Self {
        Self {
            screen: Rc::default(),
            journal: journal.clone(),
        }
    }

    pub fn cell(&self, row: usize, col: usize) -> Marker {
        self.screen.borrow().cells[row][col]
    }

    pub fn cells(&self) -> [[Marker; BOARD_WIDTH]; BOARD_WIDTH] {
        self.screen.borrow().cells
    }

    pub fn hint_cells(&self) -> usize {
        self.cells()
            .iter()
            .flatten()
            .filter(|&&m| m == Marker::HintDisc)
            .count()
    }

    pub fn labels(&self) -> (String, String) {
        self.screen.borrow().labels.clone()
    }

    pub fn message(&self) -> Option<String> {
        self.screen.borrow().message.clone()
    }

    pub fn cell_writes(&self) -> usize {
        self.screen.borrow().cell_writes
    }

    pub fn score_writes(&self) -> usize {
        self.screen.borrow().score_writes
    }
}

impl DisplaySurface for RecordingDisplay {
    fn paint_cell(&self, row: usize, col: usize, marker: Marker) {
        let mut screen = self.screen.borrow_mut();
        screen.cells[row][col] = marker;
        screen.cell_writes += 1;
    }

    fn set_scores(&self, scores: ScorePair) {
        let mut screen = self.screen.borrow_mut();
        screen.labels = (scores.black_label(), scores.white_label());
        screen.score_writes += 1;
    }

    fn show_message(&self, text: &str) {
        self.screen.borrow_mut().message = Some(text.to_string());
        self.journal.push(Event::Message(Some(text.to_string())));
    }

    fn hide_message(&self) {
        self.screen.borrow_mut().message = None;
        self.journal.push(Event::Message(None));
    }
}

/// Resolves immediately and records the requested pause.
#[derive(Clone)]
pub struct RecordingTimer {
    journal: Journal,
}

#[async_trait(?Send)]
impl Timer for RecordingTimer {
    async fn sleep(&self, duration: Duration) {
        self.journal.push(Event::Sleep(duration));
    }
}

/// Holds every sleeper until the test releases it.
#[derive(Clone, Default)]
pub struct GatedTimer {
    waiting: Rc<RefCell<Vec<oneshot::Sender<()>>>>,
    requested: Rc<RefCell<Vec<Duration>>>,
}

impl GatedTimer {
    pub fn pending(&self) -> usize {
        self.waiting.borrow().len()
    }

    pub fn requested(&self) -> Vec<Duration> {
        self.requested.borrow().clone()
    }

    pub fn release_all(&self) {
        for tx in self.waiting.borrow_mut().drain(..) {
            let _ = tx.send(());
        }
    }
}

#[async_trait(?Send)]
impl Timer for GatedTimer {
    async fn sleep(&self, duration: Duration) {
        let (tx, rx) = oneshot::channel();
        self.waiting.borrow_mut().push(tx);
        self.requested.borrow_mut().push(duration);
        let _ = rx.await;
    }
}

/// Live-game snapshot with black to move and scores matching the discs.
pub fn snapshot(board: Board, player: PlayerType) -> GameSnapshot {
    let (black, white) = board.count();
    GameSnapshot {
        board,
        scores: ScorePair::new(black, white),
        active_player_type: player,
        active_player_color: Some(PlayerColor::Black),
        is_finished: false,
    }
}

pub struct Harness<T = RecordingTimer> {
    pub controller: TurnController<FakeService, RecordingDisplay, T>,
    pub service: FakeService,
    pub display: RecordingDisplay,
    pub journal: Journal,
}

pub fn harness(game_started: bool) -> Harness {
    let journal = Journal::default();
    let timer = RecordingTimer {
        journal: journal.clone(),
    };
    harness_in(journal, game_started, timer)
}

pub fn harness_with_timer<T: Timer>(game_started: bool, timer: T) -> Harness<T> {
    harness_in(Journal::default(), game_started, timer)
}

fn harness_in<T: Timer>(journal: Journal, game_started: bool, timer: T) -> Harness<T> {
    init_test_logging();
    let service = FakeService::new(&journal);
    let display = RecordingDisplay::new(&journal);
    let config = ClientConfig {
        game_started,
        ..ClientConfig::default()
    };

    Harness {
        controller: TurnController::new(service.clone(), display.clone(), timer, config),
        service,
        display,
        journal,
    }
}
