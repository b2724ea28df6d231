pub mod types;
pub mod bitboard;
pub mod shift;
pub mod rays;
pub mod patterns;
pub mod subsets;
pub mod errors;
pub mod magic;
pub mod attacks;
pub mod board;
pub mod legality;
pub mod status;

pub use attacks::{attackers_of, attacks, is_square_attacked};
pub use bitboard::Bitboard;
pub use board::{BoardState, Occupancy};
pub use errors::{FenError, IllegalMove, MagicSearchError};
pub use legality::{legal_moves, validate, Verdict};
pub use status::is_terminal;
pub use types::{Color, Move, MoveCategory, PieceType, PromotionPiece, Slider, Terminal};
