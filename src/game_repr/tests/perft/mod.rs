use super::*;

// Reference node counts from the standard perft suite
mod starting_position;
mod kiwipete;
mod reference_positions;
mod oracle;
