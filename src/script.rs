/// Line-oriented scripts that drive a forest
///
/// ```text
/// elements 5
/// union 0 1
/// connected 0 2
/// find 3
/// size 0
/// count
/// ```
use anyhow::{anyhow, bail, Context, Result};
use nom::branch::alt;
use nom::bytes::complete::tag;
use nom::character::complete::{digit1, i64 as signed, space0, space1};
use nom::combinator::{all_consuming, map, map_res};
use nom::sequence::{delimited, pair, preceded};
use nom::IResult;
use std::fmt;
use std::io::{BufRead, Write};

use crate::forest::DisjointSetForest;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Elements(i64),
    Union(usize, usize),
    Connected(usize, usize),
    Find(usize),
    Size(usize),
    Count,
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Command::Elements(n) => write!(f, "elements {n}"),
            Command::Union(x, y) => write!(f, "union {x} {y}"),
            Command::Connected(x, y) => write!(f, "connected {x} {y}"),
            Command::Find(x) => write!(f, "find {x}"),
            Command::Size(x) => write!(f, "size {x}"),
            Command::Count => write!(f, "count"),
        }
    }
}

fn index(input: &str) -> IResult<&str, usize> {
    preceded(space1, map_res(digit1, str::parse::<usize>))(input)
}

fn index_pair(input: &str) -> IResult<&str, (usize, usize)> {
    pair(index, index)(input)
}

fn command(input: &str) -> IResult<&str, Command> {
    alt((
        map(preceded(tag("elements"), preceded(space1, signed)), Command::Elements),
        map(preceded(tag("union"), index_pair), |(x, y)| Command::Union(x, y)),
        map(preceded(tag("connected"), index_pair), |(x, y)| {
            Command::Connected(x, y)
        }),
        map(preceded(tag("find"), index), Command::Find),
        map(preceded(tag("size"), index), Command::Size),
        map(tag("count"), |_| Command::Count),
    ))(input)
}

/// Parse one script line; `None` for blank lines and `#` comments
pub fn parse_command(line: &str) -> Result<Option<Command>> {
    let trimmed = line.trim();
    if trimmed.is_empty() || trimmed.starts_with('#') {
        return Ok(None);
    }

    all_consuming(delimited(space0, command, space0))(trimmed)
        .map(|(_, cmd)| Some(cmd))
        .map_err(|e| anyhow!("Unrecognised command '{trimmed}': {e}"))
}

/// Result of executing one [`Command`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Created(usize),
    Merged(bool),
    Connected(bool),
    Root(usize),
    SetSize(usize),
    Count(usize),
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Outcome::Created(n) => write!(f, "{n}"),
            Outcome::Merged(b) | Outcome::Connected(b) => write!(f, "{b}"),
            Outcome::Root(r) => write!(f, "{r}"),
            Outcome::SetSize(s) | Outcome::Count(s) => write!(f, "{s}"),
        }
    }
}

/// A forest plus the script state around it
#[derive(Debug, Default)]
pub struct Session {
    forest: Option<DisjointSetForest>,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    /// The forest, once `elements` has run
    pub fn forest(&self) -> Option<&DisjointSetForest> {
        self.forest.as_ref()
    }

    pub fn execute(&mut self, cmd: Command) -> Result<Outcome> {
        let outcome = match (cmd, self.forest.as_mut()) {
            (Command::Elements(n), None) => {
                let forest = DisjointSetForest::try_with_len(n)?;
                let len = forest.len();
                self.forest = Some(forest);
                Outcome::Created(len)
            }
            (Command::Elements(_), Some(_)) => bail!("'elements' may only appear once"),
            (_, None) => bail!("'{cmd}' before 'elements'"),
            (Command::Union(x, y), Some(forest)) => Outcome::Merged(forest.union(x, y)?),
            (Command::Connected(x, y), Some(forest)) => {
                Outcome::Connected(forest.connected(x, y)?)
            }
            (Command::Find(x), Some(forest)) => Outcome::Root(forest.find(x)?),
            (Command::Size(x), Some(forest)) => Outcome::SetSize(forest.size(x)?),
            (Command::Count, Some(forest)) => Outcome::Count(forest.count()),
        };
        Ok(outcome)
    }
}

/// Run every command in `reader`, writing `command\toutcome` lines to `out`.
///
/// Stops at the first failing line.
pub fn run_script<R: BufRead, W: Write>(reader: R, out: &mut W) -> Result<Session> {
    let mut session = Session::new();
    let mut executed = 0usize;

    for (line_no, line) in reader.lines().enumerate() {
        let line = line.with_context(|| format!("Failed to read line {}", line_no + 1))?;
        let Some(cmd) = parse_command(&line).with_context(|| format!("Line {}", line_no + 1))?
        else {
            continue;
        };

        let outcome = session
            .execute(cmd)
            .with_context(|| format!("Line {}: '{}' failed", line_no + 1, cmd))?;
        log::trace!("{cmd} -> {outcome}");
        writeln!(out, "{cmd}\t{outcome}")?;
        executed += 1;
    }

    log::debug!("Executed {executed} commands");
    Ok(session)
}
