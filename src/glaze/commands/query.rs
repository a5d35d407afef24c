use crate::commands::{CmdMessage, CmdResult};
use crate::gallery::query::decode as decode_query;
use crate::gallery::{FilterState, SortOption};

/// Encodes an explicitly built state.
pub fn encode(state: FilterState) -> CmdResult {
    CmdResult::default().with_state(state)
}

/// Decodes `raw`, warning when the sort value is outside the vocabulary.
pub fn decode(raw: &str) -> CmdResult {
    let state = decode_query(raw);
    let mut result = CmdResult::default();
    if let SortOption::Unrecognized(sort) = &state.sort {
        result.add_message(CmdMessage::warning(format!(
            "Unrecognized sort \"{}\" leaves the gallery unsorted",
            sort
        )));
    }
    result.with_state(state)
}
