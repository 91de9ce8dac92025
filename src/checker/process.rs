use std::collections::HashSet;
use std::io::{self, Read};
use std::process::{Child, Command, ExitStatus, Stdio};
use std::sync::mpsc::{self, Receiver, RecvTimeoutError};
use std::sync::{Mutex, MutexGuard, PoisonError};
use std::thread;
use std::time::{Duration, Instant};

const POLL_INTERVAL: Duration = Duration::from_millis(10);

/// Captured output of a checker process that exited on its own.
#[derive(Debug, Clone)]
pub struct ProcessOutput {
    pub status: ExitStatus,
    pub stdout: String,
    pub stderr: String,
}

/// Why a checker process produced no usable output.
#[derive(Debug)]
pub enum RunError {
    /// The process could not be started.
    Spawn(io::Error),
    /// The deadline passed; the process group was killed.
    TimedOut,
    /// Waiting on the process or reading its pipes failed.
    Io(io::Error),
}

/// Process ids of checker children that are currently running.
///
/// Shared between the workers and the interrupt handler so that an operator
/// interrupt can kill every in-flight checker before the tool exits. Once
/// [`ChildRegistry::kill_all`] has run the registry is closed and no new
/// checker is started.
#[derive(Debug, Default)]
pub struct ChildRegistry {
    state: Mutex<RegistryState>,
}

#[derive(Debug, Default)]
struct RegistryState {
    pids: HashSet<u32>,
    closed: bool,
}

impl ChildRegistry {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, RegistryState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Track a running process group. A group registered after shutdown is killed at once.
    pub fn register(&self, pid: u32) {
        let mut state = self.lock();
        if state.closed {
            drop(state);
            kill_process_group(pid);
        } else {
            state.pids.insert(pid);
        }
    }

    pub fn unregister(&self, pid: u32) {
        self.lock().pids.remove(&pid);
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.lock().pids.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    #[must_use]
    pub fn is_closed(&self) -> bool {
        self.lock().closed
    }

    /// Close the registry and kill every registered process group.
    /// Returns how many were signalled.
    pub fn kill_all(&self) -> usize {
        let pids: Vec<u32> = {
            let mut state = self.lock();
            state.closed = true;
            state.pids.drain().collect()
        };
        pids.into_iter().filter(|&pid| kill_process_group(pid)).count()
    }

    /// Spawn `command` and register it under the same lock `kill_all` takes,
    /// so an interrupt never misses a child.
    fn spawn(&self, command: &mut Command) -> Result<(Child, Registration<'_>), RunError> {
        let mut state = self.lock();
        if state.closed {
            return Err(RunError::Spawn(io::Error::new(
                io::ErrorKind::Interrupted,
                "checker run cancelled",
            )));
        }
        let child = command.spawn().map_err(RunError::Spawn)?;
        let pid = child.id();
        state.pids.insert(pid);
        Ok((
            child,
            Registration {
                registry: self,
                pid,
            },
        ))
    }
}

/// Unregisters a child when the worker is done with it, however it finished.
struct Registration<'a> {
    registry: &'a ChildRegistry,
    pid: u32,
}

impl Drop for Registration<'_> {
    fn drop(&mut self) {
        self.registry.unregister(self.pid);
    }
}

/// Kill a checker and everything it spawned.
///
/// Children are started as process-group leaders, so on unix the group id equals the pid.
#[cfg(unix)]
pub fn kill_process_group(pid: u32) -> bool {
    let Ok(pgid) = libc::pid_t::try_from(pid) else {
        return false;
    };
    // SAFETY: killpg only sends a signal; an unknown group yields ESRCH.
    unsafe { libc::killpg(pgid, libc::SIGKILL) == 0 }
}

#[cfg(not(unix))]
pub fn kill_process_group(pid: u32) -> bool {
    Command::new("taskkill")
        .args(["/F", "/T", "/PID", &pid.to_string()])
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .status()
        .is_ok_and(|s| s.success())
}

/// Run `command` to completion or until `timeout` elapses.
///
/// The deadline also bounds draining the pipes, which a background
/// grandchild can hold open after the checker itself has exited.
///
/// # Errors
/// Returns [`RunError::Spawn`] if the process cannot start or the registry is
/// closed, [`RunError::TimedOut`] when the deadline passes, and
/// [`RunError::Io`] if its pipes cannot be drained.
pub fn run_with_timeout(
    command: &mut Command,
    timeout: Duration,
    registry: &ChildRegistry,
) -> Result<ProcessOutput, RunError> {
    command
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped());
    isolate_process_group(command);

    let deadline = Instant::now() + timeout;
    let (mut child, registration) = registry.spawn(command)?;
    let pid = registration.pid;
    tracing::debug!(pid, "spawned checker");

    let stdout = spawn_reader(child.stdout.take());
    let stderr = spawn_reader(child.stderr.take());

    let Some(status) = wait_until(&mut child, deadline)? else {
        tracing::debug!(pid, ?timeout, "checker timed out, killing process group");
        kill_process_group(pid);
        let _ = child.kill();
        let _ = child.wait();
        return Err(RunError::TimedOut);
    };

    let drained = join_reader(stdout, deadline)
        .and_then(|stdout| Ok((stdout, join_reader(stderr, deadline)?)));
    match drained {
        Ok((stdout, stderr)) => Ok(ProcessOutput {
            status,
            stdout,
            stderr,
        }),
        Err(RunError::TimedOut) => {
            tracing::debug!(pid, "checker pipes still open at deadline, killing process group");
            kill_process_group(pid);
            Err(RunError::TimedOut)
        }
        Err(e) => Err(e),
    }
}

#[cfg(unix)]
fn isolate_process_group(command: &mut Command) {
    use std::os::unix::process::CommandExt;
    command.process_group(0);
}

#[cfg(not(unix))]
const fn isolate_process_group(_command: &mut Command) {}

fn wait_until(child: &mut Child, deadline: Instant) -> Result<Option<ExitStatus>, RunError> {
    loop {
        if let Some(status) = child.try_wait().map_err(RunError::Io)? {
            return Ok(Some(status));
        }
        let now = Instant::now();
        if now >= deadline {
            return Ok(None);
        }
        thread::sleep(POLL_INTERVAL.min(deadline - now));
    }
}

type Reader = Option<Receiver<io::Result<Vec<u8>>>>;

fn spawn_reader<R: Read + Send + 'static>(pipe: Option<R>) -> Reader {
    pipe.map(|mut pipe| {
        let (tx, rx) = mpsc::channel();
        thread::spawn(move || {
            let mut buf = Vec::new();
            let _ = tx.send(pipe.read_to_end(&mut buf).map(|_| buf));
        });
        rx
    })
}

fn join_reader(reader: Reader, deadline: Instant) -> Result<String, RunError> {
    let Some(rx) = reader else {
        return Ok(String::new());
    };
    let bytes = match rx.recv_timeout(deadline.saturating_duration_since(Instant::now())) {
        Ok(read) => read.map_err(RunError::Io)?,
        Err(RecvTimeoutError::Timeout) => return Err(RunError::TimedOut),
        Err(RecvTimeoutError::Disconnected) => {
            return Err(RunError::Io(io::Error::other("pipe reader thread panicked")));
        }
    };
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}

#[cfg(test)]
#[path = "process_tests.rs"]
mod tests;
