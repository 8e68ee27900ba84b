use serde::{Deserialize, Serialize};

/// Per-element annotation driven by algorithm playback.
///
/// Elements usually travel `Unvisited -> Active -> Visited` and end up in one of the
/// two finished states, but the graph model only stores the value; transitions are
/// decided by whoever produces the playback events.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ElementState {
    #[default]
    Unvisited,
    Active,
    Visited,
    FinishedAndRelevant,
    FinishedAndNotRelevant,
}

impl ElementState {
    pub const ALL: [ElementState; 5] = [
        ElementState::Unvisited,
        ElementState::Active,
        ElementState::Visited,
        ElementState::FinishedAndRelevant,
        ElementState::FinishedAndNotRelevant,
    ];

    pub fn is_finished(self) -> bool {
        matches!(
            self,
            ElementState::FinishedAndRelevant | ElementState::FinishedAndNotRelevant
        )
    }
}
