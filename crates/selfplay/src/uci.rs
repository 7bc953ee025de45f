//! External engines over the UCI protocol.
//!
//! The engine runs as a child process. A reader thread forwards its stdout
//! line by line over a channel so that every wait for a reply carries a
//! deadline; a hung engine surfaces as `EngineUnavailable` instead of
//! blocking the caller forever.

use std::io::{BufRead, BufReader, Write};
use std::path::{Path, PathBuf};
use std::process::{Child, ChildStdin, Command, Stdio};
use std::sync::mpsc::{self, Receiver, RecvTimeoutError};
use std::thread;
use std::time::{Duration, Instant};

use cozy_chess::{Board, File, Move, Piece, Square};
use tracing::{debug, trace};

use crate::engine::{EngineBackend, EngineLauncher, EvalLimits, RawScore};
use crate::{DatagenError, Result};

/// Standard UCI text for a legal move on `board`. Castling is written as
/// the king's two-square step (`e1g1`), not as king-takes-rook.
pub fn move_to_uci(board: &Board, mv: Move) -> String {
    let castles = board.piece_on(mv.from) == Some(Piece::King)
        && board.color_on(mv.to) == board.color_on(mv.from);
    if castles {
        let file = if mv.to.file() as usize > mv.from.file() as usize {
            File::G
        } else {
            File::C
        };
        return format!("{}{}", mv.from, Square::new(file, mv.from.rank()));
    }
    mv.to_string()
}

/// Finds the legal move on `board` written as `text`.
pub fn move_from_uci(board: &Board, text: &str) -> Option<Move> {
    let mut found = None;
    board.generate_moves(|moves| {
        for mv in moves {
            if move_to_uci(board, mv) == text {
                found = Some(mv);
                return true;
            }
        }
        false
    });
    found
}

/// Score from an `info` line. Bound-only scores are ignored.
pub fn parse_score(line: &str) -> Option<RawScore> {
    let mut parts = line.split_whitespace();
    if parts.next() != Some("info") {
        return None;
    }
    let mut parts = parts.skip_while(|&p| p != "score").skip(1);
    let kind = parts.next()?;
    let value: i32 = parts.next()?.parse().ok()?;
    if matches!(parts.next(), Some("lowerbound" | "upperbound")) {
        return None;
    }
    match kind {
        "cp" => Some(RawScore::Centipawns(value)),
        "mate" => Some(RawScore::Mate(value)),
        _ => None,
    }
}

/// `Some(move)` for a `bestmove` line, `Some(None)` when the engine has no
/// move, `None` for any other line.
pub fn parse_bestmove(line: &str) -> Option<Option<&str>> {
    let mut parts = line.split_whitespace();
    if parts.next() != Some("bestmove") {
        return None;
    }
    Some(parts.next().filter(|&mv| mv != "(none)" && mv != "0000"))
}

/// A running UCI engine process, killed when dropped.
pub struct UciEngine {
    child: Child,
    stdin: ChildStdin,
    lines: Receiver<String>,
    eval: EvalLimits,
    grace: Duration,
    skill: Option<u8>,
}

impl UciEngine {
    /// Starts the engine and completes the `uci`/`isready` handshake.
    ///
    /// `grace` bounds every reply wait on top of the time the engine was
    /// asked to think.
    pub fn spawn(path: &Path, args: &[String], eval: EvalLimits, grace: Duration) -> Result<Self> {
        let mut child = Command::new(path)
            .args(args)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::null())
            .spawn()
            .map_err(|e| {
                DatagenError::EngineUnavailable(format!("failed to start {}: {}", path.display(), e))
            })?;

        let (stdin, stdout) = match (child.stdin.take(), child.stdout.take()) {
            (Some(stdin), Some(stdout)) => (stdin, stdout),
            _ => {
                let _ = child.kill();
                let _ = child.wait();
                return Err(DatagenError::EngineUnavailable(
                    "engine pipes were not captured".to_string(),
                ));
            }
        };

        let (tx, lines) = mpsc::channel();
        thread::spawn(move || {
            for line in BufReader::new(stdout).lines() {
                let Ok(line) = line else { break };
                if tx.send(line).is_err() {
                    break;
                }
            }
        });

        let mut engine = Self {
            child,
            stdin,
            lines,
            eval,
            grace,
            skill: None,
        };
        engine.handshake()?;
        debug!(path = %path.display(), pid = engine.child.id(), "engine started");
        Ok(engine)
    }

    fn handshake(&mut self) -> Result<()> {
        self.send("uci")?;
        self.read_until(self.grace, |line| (line.trim() == "uciok").then_some(()))?;
        self.sync()?;
        self.send("ucinewgame")?;
        self.sync()
    }

    fn sync(&mut self) -> Result<()> {
        self.send("isready")?;
        self.read_until(self.grace, |line| (line.trim() == "readyok").then_some(()))
    }

    fn send(&mut self, command: &str) -> Result<()> {
        trace!(command, "engine <");
        writeln!(self.stdin, "{}", command)?;
        self.stdin.flush()?;
        Ok(())
    }

    /// Feeds engine output to `handle` until it produces a value.
    fn read_until<T>(
        &mut self,
        timeout: Duration,
        mut handle: impl FnMut(&str) -> Option<T>,
    ) -> Result<T> {
        let deadline = Instant::now() + timeout;
        loop {
            let remaining = deadline.saturating_duration_since(Instant::now());
            match self.lines.recv_timeout(remaining) {
                Ok(line) => {
                    trace!(line = %line, "engine >");
                    if let Some(value) = handle(&line) {
                        return Ok(value);
                    }
                }
                Err(RecvTimeoutError::Timeout) => {
                    return Err(DatagenError::EngineUnavailable(format!(
                        "no reply within {:?}",
                        timeout
                    )))
                }
                Err(RecvTimeoutError::Disconnected) => {
                    return Err(DatagenError::EngineUnavailable(
                        "engine process exited".to_string(),
                    ))
                }
            }
        }
    }

    fn set_position(&mut self, board: &Board) -> Result<()> {
        self.send(&format!("position fen {}", board))
    }
}

impl EngineBackend for UciEngine {
    fn best_move(&mut self, board: &Board, skill: u8, time: Duration) -> Result<Move> {
        if self.skill != Some(skill) {
            self.send(&format!("setoption name Skill Level value {}", skill))?;
            self.skill = Some(skill);
        }
        self.set_position(board)?;
        self.send(&format!("go movetime {}", time.as_millis().max(1)))?;

        let reply = self.read_until(time + self.grace, |line| {
            parse_bestmove(line).map(|mv| mv.map(str::to_string))
        })?;
        let Some(text) = reply else {
            return Err(DatagenError::InvalidPosition(format!(
                "engine has no move in {}",
                board
            )));
        };
        move_from_uci(board, &text).ok_or_else(|| {
            DatagenError::EngineUnavailable(format!("engine sent illegal move {} in {}", text, board))
        })
    }

    fn evaluate(&mut self, board: &Board) -> Result<RawScore> {
        self.set_position(board)?;
        self.send(&format!(
            "go depth {} movetime {}",
            self.eval.depth,
            self.eval.time.as_millis().max(1)
        ))?;

        let mut last = None;
        let score = self.read_until(self.eval.time + self.grace, |line| {
            if let Some(score) = parse_score(line) {
                last = Some(score);
            }
            parse_bestmove(line).map(|_| last)
        })?;
        score.ok_or_else(|| DatagenError::EngineUnavailable("engine reported no score".to_string()))
    }
}

impl Drop for UciEngine {
    fn drop(&mut self) {
        let _ = self.send("quit");
        let _ = self.child.kill();
        let _ = self.child.wait();
        debug!(pid = self.child.id(), "engine stopped");
    }
}

/// Launches one engine process per call.
#[derive(Debug, Clone)]
pub struct UciLauncher {
    pub path: PathBuf,
    pub args: Vec<String>,
    pub eval: EvalLimits,
    pub grace: Duration,
}

impl EngineLauncher for UciLauncher {
    fn launch(&self) -> Result<Box<dyn EngineBackend>> {
        let engine = UciEngine::spawn(&self.path, &self.args, self.eval, self.grace)?;
        Ok(Box::new(engine))
    }
}

#[cfg(test)]
#[path = "uci_tests.rs"]
mod uci_tests;
