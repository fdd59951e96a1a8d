//! Line based user input.

use std::{io, sync::Arc};

use async_trait::async_trait;
use mockall::automock;
use tokio::{
    io::{AsyncBufReadExt, BufReader, Lines, Stdin},
    sync::Mutex,
};

/// Source of user input lines.
#[automock]
#[async_trait]
pub trait LineReader: Send + Sync {
    /// Reads one line, without its trailing newline or surrounding spaces.
    ///
    /// Returns an [`io::ErrorKind::UnexpectedEof`] error once the input is closed.
    async fn read_line(&self) -> io::Result<String>;
}

/// Reads lines from the process standard input.
///
/// Clones share the same underlying reader, so a single instance can be
/// handed to every game cycle without losing buffered input.
#[derive(Clone)]
pub struct StdinReader {
    lines: Arc<Mutex<Lines<BufReader<Stdin>>>>,
}

impl StdinReader {
    pub fn new() -> Self {
        StdinReader {
            lines: Arc::new(Mutex::new(BufReader::new(tokio::io::stdin()).lines())),
        }
    }
}

impl Default for StdinReader {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl LineReader for StdinReader {
    async fn read_line(&self) -> io::Result<String> {
        match self.lines.lock().await.next_line().await? {
            Some(line) => Ok(line.trim().to_owned()),
            None => Err(io::Error::new(
                io::ErrorKind::UnexpectedEof,
                "standard input closed",
            )),
        }
    }
}
