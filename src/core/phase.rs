//! Turn phases.

use serde::{Deserialize, Serialize};

/// One phase of a turn. Turns cycle start → draw → main → attack → end.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Phase {
    #[default]
    Start,
    Draw,
    Main,
    Attack,
    End,
}

impl Phase {
    /// All phases in turn order.
    pub const ORDER: [Phase; 5] = [Phase::Start, Phase::Draw, Phase::Main, Phase::Attack, Phase::End];

    /// Position within `ORDER`.
    #[must_use]
    pub const fn index(self) -> usize {
        match self {
            Phase::Start => 0,
            Phase::Draw => 1,
            Phase::Main => 2,
            Phase::Attack => 3,
            Phase::End => 4,
        }
    }

    /// The following phase, wrapping from `End` back to `Start`.
    #[must_use]
    pub const fn next(self) -> Phase {
        Self::ORDER[(self.index() + 1) % Self::ORDER.len()]
    }

    /// True when advancing from this phase starts a new turn.
    #[must_use]
    pub const fn wraps(self) -> bool {
        matches!(self, Phase::End)
    }

    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Phase::Start => "start",
            Phase::Draw => "draw",
            Phase::Main => "main",
            Phase::Attack => "attack",
            Phase::End => "end",
        }
    }
}

impl std::fmt::Display for Phase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cycle() {
        assert_eq!(Phase::Start.next(), Phase::Draw);
        assert_eq!(Phase::Draw.next(), Phase::Main);
        assert_eq!(Phase::Main.next(), Phase::Attack);
        assert_eq!(Phase::Attack.next(), Phase::End);
        assert_eq!(Phase::End.next(), Phase::Start);
    }

    #[test]
    fn test_only_end_wraps() {
        let wrapping: Vec<_> = Phase::ORDER.iter().filter(|p| p.wraps()).collect();
        assert_eq!(wrapping, vec![&Phase::End]);
    }

    #[test]
    fn test_index_matches_order() {
        for (i, phase) in Phase::ORDER.iter().enumerate() {
            assert_eq!(phase.index(), i);
        }
    }
}
