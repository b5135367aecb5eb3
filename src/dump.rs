//! Level by level dumps of a [SkipList](crate::SkipList).
//!
//! Each occupied level prints as one line, `Level 0: 5 -> 10 -> 15 .` when
//! walked forward from the head and `Level 0: 15 <- 10 <- 5 .` when walked
//! backward from the tail. The sentinels themselves are not printed.

use core::fmt::{self, Display};
use std::io;

use crate::SkipList;

/// Which sentinel a dump starts walking from.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Direction {
    Forward,
    Backward,
}

impl Direction {
    fn arrow(self) -> &'static str {
        match self {
            Direction::Forward => " -> ",
            Direction::Backward => " <- ",
        }
    }
}

pub struct Dump<'a, G> {
    list: &'a SkipList<G>,
    direction: Direction,
}

impl<G> Display for Dump<'_, G> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for level in 0..=self.list.level() {
            write!(f, "Level {}: ", level)?;

            let mut empty = true;
            for value in self.list.walk(level, self.direction) {
                if !empty {
                    f.write_str(self.direction.arrow())?;
                }
                write!(f, "{}", value)?;
                empty = false;
            }

            if empty {
                writeln!(f, ".")?;
            } else {
                writeln!(f, " .")?;
            }
        }

        Ok(())
    }
}

impl<G> SkipList<G> {
    pub fn dump(&self, direction: Direction) -> Dump<'_, G> {
        Dump {
            list: self,
            direction,
        }
    }

    /// Writes every level walked forward from the head.
    pub fn show<W: io::Write>(&self, mut out: W) -> io::Result<()> {
        write!(out, "{}", self.dump(Direction::Forward))
    }

    /// Writes every level walked backward from the tail.
    pub fn tail_show<W: io::Write>(&self, mut out: W) -> io::Result<()> {
        write!(out, "{}", self.dump(Direction::Backward))
    }
}

impl<G> Display for SkipList<G> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.dump(Direction::Forward).fmt(f)
    }
}
