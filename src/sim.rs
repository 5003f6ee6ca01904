/**********************************************************************************************
*
*   rebound - simulation runner
*
*   Owns a world behind a lock and runs its ticks, either on demand or from a loop thread
*   (`phys_thread` feature). Commands coming from other threads never run in the middle
*   of a tick: while the loop is running they wait in a single-slot mailbox and are
*   executed at the top of the next tick, the most recent one winning. The mailbox has
*   its own lock, so posting never waits for a tick.
*
*   LICENSE: zlib/libpng
*
*   Copyright (c) 2025 rebound contributors
*
**********************************************************************************************/

use std::{
    fmt,
    fs::File,
    io::{BufReader, BufWriter},
    path::PathBuf,
    sync::{
        atomic::{AtomicBool, Ordering},
        mpsc::{self, Receiver, RecvTimeoutError, Sender},
        Arc, Mutex, MutexGuard, TryLockError,
    },
    time::Duration,
};

#[cfg(feature = "phys_thread")]
use std::thread;

use log::{debug, info, warn};

use crate::{
    canvas::Canvas,
    config::SimulationConfig,
    error::Result,
    scenario::Scenario,
    world::{TickReport, World},
    DEFAULT_MAX_OBJECTS,
};

//----------------------------------------------------------------------------------
// Defines and Macros
//----------------------------------------------------------------------------------
const POISONED: &str = "thread poison recovery is not supported";

/// How often a blocked collision inspection checks whether it was released
const GATE_POLL_INTERVAL: Duration = Duration::from_millis(20);

//----------------------------------------------------------------------------------
// Types and Structures Definition
//----------------------------------------------------------------------------------
/// Single-slot holder where a newer value replaces an older one
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Mailbox<T> {
    slot: Option<T>,
}

/// Work requested from outside the tick loop
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Reset(Scenario),
    Clear,
    Load(PathBuf),
    Save(PathBuf),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommandStatus {
    /// Ran right away, the loop was idle
    Done,
    /// Left for the loop to run at the next tick boundary
    Queued,
}

struct SimulationState<const N: usize> {
    world: World<N>,
    config: SimulationConfig,
}

/// Blocks a tick after a collision until someone acknowledges it
struct CollisionGate {
    acknowledgements: Mutex<Sender<()>>,
    waiting: Mutex<Receiver<()>>,
    released: AtomicBool,
    /// A tick is currently parked in [`CollisionGate::wait`]
    blocked: AtomicBool,
}

/// World and configuration behind one lock, ticked by [`Simulation::run_tick`] or the loop thread
///
/// The run flag and the command mailbox sit outside the world lock, so queueing a command
/// never waits on a tick, even one held up by a collision inspection.
pub struct Simulation<const N: usize = DEFAULT_MAX_OBJECTS> {
    state: Arc<Mutex<SimulationState<N>>>,
    /// Loop thread enabled state
    running: Arc<AtomicBool>,
    pending: Arc<Mutex<Mailbox<Command>>>,
    gate: Arc<CollisionGate>,
    #[cfg(feature = "phys_thread")]
    /// Loop thread
    loop_thread: Option<thread::JoinHandle<()>>,
}

//----------------------------------------------------------------------------------
// Module Functions Definition
//----------------------------------------------------------------------------------
impl<T> Default for Mailbox<T> {
    fn default() -> Self {
        Self { slot: None }
    }
}

impl<T: fmt::Debug> Mailbox<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores `value`, handing back whatever it replaced
    pub fn post(&mut self, value: T) -> Option<T> {
        if let Some(old) = &self.slot {
            warn!("pending {old:?} dropped in favour of {value:?}");
        }
        self.slot.replace(value)
    }

    pub fn take(&mut self) -> Option<T> {
        self.slot.take()
    }

    pub fn is_empty(&self) -> bool {
        self.slot.is_none()
    }
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Command::Reset(scenario) => write!(f, "reset to {scenario}"),
            Command::Clear => f.write_str("clear"),
            Command::Load(path) => write!(f, "load {}", path.display()),
            Command::Save(path) => write!(f, "save {}", path.display()),
        }
    }
}

impl<const N: usize> SimulationState<N> {
    fn run_command(&mut self, command: Command) -> Result<()> {
        debug!("running command: {command}");
        match command {
            Command::Reset(scenario) => {
                scenario.populate(&mut self.world)?;
                if scenario.wants_gravity() {
                    self.config.gravity_enabled = true;
                }
            }
            Command::Clear => self.world.clear(),
            Command::Load(path) => {
                let file = File::open(&path)?;
                self.world.load_from(BufReader::new(file))?;
                info!("scene loaded from {}", path.display());
            }
            Command::Save(path) => {
                let file = File::create(&path)?;
                self.world.save_to(BufWriter::new(file))?;
                info!("scene saved to {}", path.display());
            }
        }
        Ok(())
    }

    fn run_deferred(&mut self, command: Option<Command>) {
        if let Some(command) = command {
            if let Err(e) = self.run_command(command) {
                warn!("deferred command failed: {e}");
            }
        }
    }

    /// Runs the command taken from the mailbox, then one tick
    fn step(&mut self, command: Option<Command>, canvas: Option<&mut dyn Canvas>, gate: &CollisionGate) -> TickReport {
        self.run_deferred(command);

        let Self { world, config } = self;
        world.tick_inspected(config, canvas, |a, b| {
            info!("collision between {} and {}, waiting for acknowledgement", a.name(), b.name());
            gate.wait();
        })
    }
}

impl CollisionGate {
    fn new() -> Self {
        let (tx, rx) = mpsc::channel();
        Self {
            acknowledgements: Mutex::new(tx),
            waiting: Mutex::new(rx),
            released: AtomicBool::new(false),
            blocked: AtomicBool::new(false),
        }
    }

    fn wait(&self) {
        let rx = self.waiting.lock().expect(POISONED);
        // Acknowledgements sent before this collision do not count
        while rx.try_recv().is_ok() {}
        self.blocked.store(true, Ordering::Release);
        while !self.released.load(Ordering::Acquire) {
            match rx.recv_timeout(GATE_POLL_INTERVAL) {
                Ok(()) | Err(RecvTimeoutError::Disconnected) => break,
                Err(RecvTimeoutError::Timeout) => {}
            }
        }
        self.blocked.store(false, Ordering::Release);
    }

    fn acknowledge(&self) {
        // The receiver lives as long as the gate, so sending cannot fail
        let _ = self.acknowledgements.lock().expect(POISONED).send(());
    }

    fn set_released(&self, released: bool) {
        self.released.store(released, Ordering::Release);
    }

    fn is_blocked(&self) -> bool {
        self.blocked.load(Ordering::Acquire)
    }
}

impl<const N: usize> Drop for Simulation<N> {
    fn drop(&mut self) {
        self.gate.set_released(true);
        #[cfg(feature = "phys_thread")]
        self.stop();
    }
}

impl<const N: usize> Simulation<N> {
    pub fn new(world: World<N>, config: SimulationConfig) -> Self {
        Self {
            state: Arc::new(Mutex::new(SimulationState { world, config })),
            running: Arc::new(AtomicBool::new(false)),
            pending: Arc::new(Mutex::new(Mailbox::new())),
            gate: Arc::new(CollisionGate::new()),
            #[cfg(feature = "phys_thread")]
            loop_thread: None,
        }
    }

    /// Returns true while the loop is driving ticks
    pub fn is_running(&self) -> bool {
        self.running.load(Ordering::Acquire)
    }

    pub fn has_pending(&self) -> bool {
        !self.pending.lock().expect(POISONED).is_empty()
    }

    /// Returns true while a tick is held up waiting for [`Simulation::acknowledge`]
    pub fn is_waiting_for_acknowledgement(&self) -> bool {
        self.gate.is_blocked()
    }

    /// Runs `command` now when the loop is idle, otherwise leaves it for the next tick
    ///
    /// Queueing only touches the mailbox, so it returns at once even while a tick is
    /// blocked on a collision inspection.
    pub fn execute(&self, command: Command) -> Result<CommandStatus> {
        {
            let mut pending = self.pending.lock().expect(POISONED);
            if self.running.load(Ordering::Acquire) {
                pending.post(command);
                return Ok(CommandStatus::Queued);
            }
        }

        self.state.lock().expect(POISONED).run_command(command)?;
        Ok(CommandStatus::Done)
    }

    /// Runs one tick on the calling thread
    ///
    /// With `inspect_collisions` set, every resolved collision parks this call until
    /// another thread calls [`Simulation::acknowledge`].
    pub fn run_tick(&self, canvas: Option<&mut dyn Canvas>) -> TickReport {
        let command = self.pending.lock().expect(POISONED).take();
        self.state.lock().expect(POISONED).step(command, canvas, &self.gate)
    }

    /// Lets a tick blocked on a collision continue
    pub fn acknowledge(&self) {
        self.gate.acknowledge();
    }

    /// Read access to the world and configuration between ticks, waiting for a tick in progress
    pub fn borrowed<R>(&self, f: impl FnOnce(&World<N>, &SimulationConfig) -> R) -> R {
        let state = self.state.lock().expect(POISONED);
        f(&state.world, &state.config)
    }

    /// Write access to the world and configuration between ticks, waiting for a tick in progress
    pub fn borrowed_mut<R>(&self, f: impl FnOnce(&mut World<N>, &mut SimulationConfig) -> R) -> R {
        let mut state = self.state.lock().expect(POISONED);
        let SimulationState { world, config } = &mut *state;
        f(world, config)
    }

    /// Like [`Simulation::borrowed`], but gives up with [`None`] instead of waiting
    pub fn try_borrowed<R>(&self, f: impl FnOnce(&World<N>, &SimulationConfig) -> R) -> Option<R> {
        let state = self.try_state()?;
        Some(f(&state.world, &state.config))
    }

    /// Like [`Simulation::borrowed_mut`], but gives up with [`None`] instead of waiting
    pub fn try_borrowed_mut<R>(&self, f: impl FnOnce(&mut World<N>, &mut SimulationConfig) -> R) -> Option<R> {
        let mut state = self.try_state()?;
        let SimulationState { world, config } = &mut *state;
        Some(f(world, config))
    }

    fn try_state(&self) -> Option<MutexGuard<'_, SimulationState<N>>> {
        match self.state.try_lock() {
            Ok(state) => Some(state),
            Err(TryLockError::WouldBlock) => None,
            Err(TryLockError::Poisoned(_)) => panic!("{POISONED}"),
        }
    }
}

#[cfg(feature = "phys_thread")]
impl<const N: usize> Simulation<N> {
    /// Starts the loop thread; does nothing if it is already running
    pub fn start(&mut self) {
        if self.loop_thread.is_some() {
            return;
        }
        self.gate.set_released(false);
        self.running.store(true, Ordering::Release);

        let state = Arc::clone(&self.state);
        let pending = Arc::clone(&self.pending);
        let running = Arc::clone(&self.running);
        let gate = Arc::clone(&self.gate);
        self.loop_thread = Some(thread::spawn(move || simulation_loop(state, pending, running, gate)));
        debug!("simulation loop started");
    }

    /// Stops and joins the loop thread, then runs any command it left pending
    pub fn stop(&mut self) {
        let Some(handle) = self.loop_thread.take() else { return };

        // A tick blocked on an inspection must be let go before the loop can notice
        self.gate.set_released(true);
        {
            // Under the mailbox lock so no command is queued after the final drain
            let _pending = self.pending.lock().expect(POISONED);
            self.running.store(false, Ordering::Release);
        }
        handle.join().expect("simulation loop thread panicked");
        self.gate.set_released(false);

        let command = self.pending.lock().expect(POISONED).take();
        self.state.lock().expect(POISONED).run_deferred(command);
        debug!("simulation loop stopped");
    }
}

#[cfg(feature = "phys_thread")]
fn simulation_loop<const N: usize>(
    state: Arc<Mutex<SimulationState<N>>>,
    pending: Arc<Mutex<Mailbox<Command>>>,
    running: Arc<AtomicBool>,
    gate: Arc<CollisionGate>,
) {
    while running.load(Ordering::Acquire) {
        let command = pending.lock().expect(POISONED).take();
        let pause = {
            let mut state = state.lock().expect(POISONED);
            let report = state.step(command, None, &gate);
            if report.is_game_over() {
                info!("game over");
            }
            Duration::from_millis(state.config.ms_between_ticks)
        };

        thread::sleep(pause);
    }
}
