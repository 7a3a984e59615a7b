pub mod pawn;
pub mod knight;
pub mod bishop;
pub mod rook;
pub mod queen;
pub mod king;

use pawn::*;
use knight::*;
use bishop::*;
use rook::*;
use queen::*;
use king::*;