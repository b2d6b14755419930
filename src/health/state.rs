//! Probe stage machine.
//!
//! # States
//! ```text
//! Start → Validating → Connecting → Sending → Receiving → Parsing → Done
//! ```
//!
//! Any stage may jump straight to `Done` with a failure. Stages only move
//! forward; there is no retry edge.

use std::fmt;

use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ProbeStage {
    Start,
    Validating,
    Connecting,
    Sending,
    Receiving,
    Parsing,
    Done,
}

impl ProbeStage {
    pub fn as_str(self) -> &'static str {
        match self {
            ProbeStage::Start => "start",
            ProbeStage::Validating => "validating",
            ProbeStage::Connecting => "connecting",
            ProbeStage::Sending => "sending",
            ProbeStage::Receiving => "receiving",
            ProbeStage::Parsing => "parsing",
            ProbeStage::Done => "done",
        }
    }

    /// Whether moving from `self` to `next` is a legal transition.
    pub fn can_advance_to(self, next: ProbeStage) -> bool {
        next == ProbeStage::Done || (self != ProbeStage::Done && next > self)
    }
}

impl fmt::Display for ProbeStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stages_only_move_forward() {
        assert!(ProbeStage::Start.can_advance_to(ProbeStage::Validating));
        assert!(ProbeStage::Receiving.can_advance_to(ProbeStage::Parsing));
        assert!(!ProbeStage::Parsing.can_advance_to(ProbeStage::Connecting));
        assert!(!ProbeStage::Sending.can_advance_to(ProbeStage::Sending));
    }

    #[test]
    fn any_stage_may_finish() {
        for stage in [
            ProbeStage::Start,
            ProbeStage::Validating,
            ProbeStage::Connecting,
            ProbeStage::Sending,
            ProbeStage::Receiving,
            ProbeStage::Parsing,
        ] {
            assert!(stage.can_advance_to(ProbeStage::Done), "{stage}");
        }
        assert!(!ProbeStage::Done.can_advance_to(ProbeStage::Start));
    }
}
