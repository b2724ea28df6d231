//! Error types. Move illegality is an ordinary outcome and is reported as a
//! value; only a failed magic search is treated as fatal by the callers.

use crate::types::Slider;
use thiserror::Error;

/// Why a candidate move was rejected. Exactly one kind is reported: the first
/// rule of the chain that failed.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum IllegalMove {
    #[error("no piece of the side to move on the source square")]
    NoPieceAtSource,
    #[error("destination is occupied by a piece of the side to move")]
    OwnPieceAtDestination,
    #[error("piece cannot reach the destination")]
    BadDestination,
    #[error("move leaves the king in check")]
    LeavesKingInCheck,

    #[error("no en passant capture is available on that square")]
    EnPassantNotAvailable,
    #[error("en passant must start from the fifth rank (fourth for black)")]
    EnPassantWrongSourceRank,
    #[error("only a pawn can capture en passant")]
    EnPassantSourceNotPawn,
    #[error("the pawn does not attack the en passant square")]
    EnPassantNotAttackedBySource,

    #[error("castling right has been lost")]
    CastleUnavailable,
    #[error("castling must land on c1, g1, c8 or g8 of the mover's back rank")]
    CastleBadDestination,
    #[error("castling must start from the king on its home square")]
    CastleBadSource,
    #[error("a piece stands between king and rook")]
    CastleBlocked,
    #[error("the king would castle out of, through or into check")]
    CastleThroughCheck,

    #[error("only a pawn can promote")]
    PromotionSourceNotPawn,
    #[error("a pawn reaching the last rank must promote")]
    PromotionRequired,
    #[error("promotion must land on the last rank")]
    PromotionNotOnLastRank,
}

#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum MagicSearchError {
    #[error("no {slider} magic found for square {square} after {attempts} attempts")]
    AttemptsExhausted {
        square: u8,
        slider: Slider,
        attempts: u64,
    },
}

/// Errors from the minimal FEN reader used to build positions
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FenError {
    #[error("FEN must have at least 4 space separated fields, got {0}")]
    MissingFields(usize),
    #[error("unexpected char {0:?} in piece placement")]
    InvalidPieceChar(char),
    #[error("piece placement does not describe 8 ranks of 8 files")]
    BadPlacement,
    #[error("active color must be `w` or `b`, got {0:?}")]
    InvalidColor(String),
    #[error("invalid castling field {0:?}")]
    InvalidCastling(String),
    #[error("invalid en passant square {0:?}")]
    InvalidEnPassant(String),
}
