//! Match participants.
//!
//! A participant is only a label: who it is, which mark it places, and
//! whether its moves come from a person or from the search engine. The
//! orchestrator inspects [`Kind`] to decide where the next move comes from.

use std::fmt;

use crate::board::Mark;
use crate::constants::AI_NAME;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Kind {
    Human,
    Automated,
}

impl fmt::Display for Kind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Kind::Human => write!(f, "User"),
            Kind::Automated => write!(f, "AI"),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Participant {
    name: String,
    mark: Mark,
    kind: Kind,
}

impl Participant {
    pub fn new(name: impl Into<String>, mark: Mark, kind: Kind) -> Self {
        Self {
            name: name.into(),
            mark,
            kind,
        }
    }

    pub fn human(name: impl Into<String>, mark: Mark) -> Self {
        Self::new(name, mark, Kind::Human)
    }

    pub fn automated(mark: Mark) -> Self {
        Self::new(AI_NAME, mark, Kind::Automated)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn mark(&self) -> Mark {
        self.mark
    }

    pub fn kind(&self) -> Kind {
        self.kind
    }

    pub fn is_automated(&self) -> bool {
        self.kind == Kind::Automated
    }
}

impl fmt::Display for Participant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.name, self.mark)
    }
}
