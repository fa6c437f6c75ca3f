// Pseudo-legal move generation, one file per piece kind.
// Each adds `impl Position` methods writing into a shared MoveList.

mod pawn;
mod knight;
mod bishop;
mod rook;
mod queen;
mod king;
