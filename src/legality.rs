//! Move legality.
//!
//! A move is checked by folding over an ordered list of small rules picked by
//! its category. Cheap precondition rules come first; the chain stops at the
//! first failure. A move that passes every rule is applied to a copy of the
//! occupancy and the mover's king is tested on the result. That post-move
//! occupancy is handed back so the caller does not have to recompute it.

use itertools::Itertools;

use crate::attacks::{attacks, is_square_attacked, pawn_pushes};
use crate::bitboard::{is_set, rank_of, set_bit_indices, sq_to_bb, Bitboard};
use crate::board::{BoardState, Occupancy};
use crate::errors::IllegalMove;
use crate::shift::{north, south};
use crate::types::{Color, Move, MoveCategory, PieceType, PromotionPiece};

/// Legal moves carry the occupancy after the move
pub type Verdict = Result<Occupancy, IllegalMove>;

type Rule = fn(&MoveContext) -> Result<(), IllegalMove>;

/// Everything a rule may look at. Built once per validation.
pub struct MoveContext<'a> {
    pub board: &'a BoardState,
    pub mv: Move,
    pub color: Color,
    /// Piece of the side to move on the source square
    pub mover: Option<PieceType>,
}

impl<'a> MoveContext<'a> {
    pub fn new(board: &'a BoardState, mv: Move) -> Self {
        let color = board.active_color;
        let mover = PieceType::ALL
            .into_iter()
            .find(|&p| is_set(board.occupancy.piece_bb(color, p), mv.from));
        Self {
            board,
            mv,
            color,
            mover,
        }
    }

    /// Occupancy with the move played. Only meaningful once the rules passed.
    fn occupancy_after(&self, piece: PieceType) -> Occupancy {
        let mut occ = self.board.occupancy;
        let (from, to) = (self.mv.from, self.mv.to);
        let enemy = self.color.other_color();

        match self.mv.category {
            MoveCategory::Normal => {
                occ.remove_color(enemy, to);
                occ.shift_piece(self.color, piece, from, to);
            }
            MoveCategory::Promotion(promoted) => {
                occ.remove_color(enemy, to);
                occ.remove_color(self.color, from);
                occ.put(self.color, promoted.piece_type(), to);
            }
            MoveCategory::EnPassant => {
                // the captured pawn sits behind the target square, not on it
                if let Some(victim) = en_passant_victim(self.color, to) {
                    occ.remove(enemy, PieceType::Pawn, victim);
                }
                occ.shift_piece(self.color, PieceType::Pawn, from, to);
            }
            MoveCategory::Castle => {
                occ.shift_piece(self.color, PieceType::King, from, to);
                if let Some(castle) = castle_geometry(self.color, to) {
                    occ.shift_piece(self.color, PieceType::Rook, castle.rook_from, castle.rook_to);
                }
            }
        }
        occ
    }
}

/// Check a candidate move against the position.
pub fn validate(board: &BoardState, mv: Move) -> Verdict {
    let ctx = MoveContext::new(board, mv);
    rules_for(mv.category)
        .iter()
        .try_for_each(|rule| rule(&ctx))?;

    let piece = ctx.mover.ok_or(IllegalMove::NoPieceAtSource)?;
    let after = ctx.occupancy_after(piece);
    king_is_safe(&after, ctx.color)?;
    Ok(after)
}

const NORMAL_RULES: &[Rule] = &[
    source_is_own_piece,
    destination_not_own,
    destination_reachable,
    pawn_must_promote,
];

const PROMOTION_RULES: &[Rule] = &[
    source_is_own_piece,
    promotion_source_is_pawn,
    destination_not_own,
    destination_reachable,
    promotion_on_last_rank,
];

const EN_PASSANT_RULES: &[Rule] = &[
    en_passant_source_is_pawn,
    en_passant_source_rank,
    en_passant_target_matches,
    en_passant_attacked_by_source,
];

const CASTLE_RULES: &[Rule] = &[
    castle_destination,
    castle_source,
    castle_rights,
    castle_path_clear,
    castle_path_safe,
];

fn rules_for(category: MoveCategory) -> &'static [Rule] {
    match category {
        MoveCategory::Normal => NORMAL_RULES,
        MoveCategory::Promotion(_) => PROMOTION_RULES,
        MoveCategory::EnPassant => EN_PASSANT_RULES,
        MoveCategory::Castle => CASTLE_RULES,
    }
}

// =========================================================================
// Normal and promotion rules
// =========================================================================

fn source_is_own_piece(ctx: &MoveContext) -> Result<(), IllegalMove> {
    match ctx.mover {
        Some(_) => Ok(()),
        None => Err(IllegalMove::NoPieceAtSource),
    }
}

fn destination_not_own(ctx: &MoveContext) -> Result<(), IllegalMove> {
    if is_set(ctx.board.occupancy.color_bb(ctx.color), ctx.mv.to) {
        Err(IllegalMove::OwnPieceAtDestination)
    } else {
        Ok(())
    }
}

fn destination_reachable(ctx: &MoveContext) -> Result<(), IllegalMove> {
    let piece = ctx.mover.ok_or(IllegalMove::NoPieceAtSource)?;
    let targets = pseudo_legal_targets(ctx.board, piece, ctx.color, ctx.mv.from);
    if is_set(targets, ctx.mv.to) {
        Ok(())
    } else {
        Err(IllegalMove::BadDestination)
    }
}

fn pawn_must_promote(ctx: &MoveContext) -> Result<(), IllegalMove> {
    if ctx.mover == Some(PieceType::Pawn) && rank_of(ctx.mv.to) == ctx.color.promotion_rank() {
        Err(IllegalMove::PromotionRequired)
    } else {
        Ok(())
    }
}

fn promotion_source_is_pawn(ctx: &MoveContext) -> Result<(), IllegalMove> {
    if ctx.mover == Some(PieceType::Pawn) {
        Ok(())
    } else {
        Err(IllegalMove::PromotionSourceNotPawn)
    }
}

fn promotion_on_last_rank(ctx: &MoveContext) -> Result<(), IllegalMove> {
    if rank_of(ctx.mv.to) == ctx.color.promotion_rank() {
        Ok(())
    } else {
        Err(IllegalMove::PromotionNotOnLastRank)
    }
}

// =========================================================================
// En passant rules
// =========================================================================

/// Square of the pawn taken by an en passant capture landing on `to`
#[inline]
fn en_passant_victim(color: Color, to: u8) -> Option<u8> {
    match color {
        Color::White => to.checked_sub(8),
        Color::Black => Some(to + 8).filter(|&sq| sq < 64),
    }
}

fn en_passant_source_is_pawn(ctx: &MoveContext) -> Result<(), IllegalMove> {
    if ctx.mover == Some(PieceType::Pawn) {
        Ok(())
    } else {
        Err(IllegalMove::EnPassantSourceNotPawn)
    }
}

fn en_passant_source_rank(ctx: &MoveContext) -> Result<(), IllegalMove> {
    if rank_of(ctx.mv.from) == ctx.color.en_passant_source_rank() {
        Ok(())
    } else {
        Err(IllegalMove::EnPassantWrongSourceRank)
    }
}

/// The target must be the announced square with an enemy pawn right behind it
fn en_passant_target_matches(ctx: &MoveContext) -> Result<(), IllegalMove> {
    let enemy_pawns = ctx
        .board
        .occupancy
        .piece_bb(ctx.color.other_color(), PieceType::Pawn);
    let victim_present = en_passant_victim(ctx.color, ctx.mv.to)
        .map_or(false, |victim| is_set(enemy_pawns, victim));
    match ctx.board.en_passant_target {
        Some(target) if target == ctx.mv.to && victim_present => Ok(()),
        _ => Err(IllegalMove::EnPassantNotAvailable),
    }
}

fn en_passant_attacked_by_source(ctx: &MoveContext) -> Result<(), IllegalMove> {
    let occupied = ctx.board.occupancy.occupied();
    if is_set(attacks(PieceType::Pawn, ctx.color, ctx.mv.from, occupied), ctx.mv.to) {
        Ok(())
    } else {
        Err(IllegalMove::EnPassantNotAttackedBySource)
    }
}

// =========================================================================
// Castling rules
// =========================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CastleGeometry {
    pub color: Color,
    pub kingside: bool,
    pub king_from: u8,
    pub king_to: u8,
    pub rook_from: u8,
    pub rook_to: u8,
    /// Squares strictly between king and rook
    pub between: Bitboard,
    /// King start, transit and destination squares
    pub king_path: Bitboard,
}

const fn geometry(color: Color, kingside: bool) -> CastleGeometry {
    let base = color.back_rank() * 8;
    let (king_to, rook_from, rook_to, between, path) = if kingside {
        (6, 7, 5, [5, 6, 6], [4, 5, 6])
    } else {
        (2, 0, 3, [1, 2, 3], [4, 3, 2])
    };
    CastleGeometry {
        color,
        kingside,
        king_from: base + 4,
        king_to: base + king_to,
        rook_from: base + rook_from,
        rook_to: base + rook_to,
        between: sq_to_bb(base + between[0]) | sq_to_bb(base + between[1]) | sq_to_bb(base + between[2]),
        king_path: sq_to_bb(base + path[0]) | sq_to_bb(base + path[1]) | sq_to_bb(base + path[2]),
    }
}

/// The four ways to castle: g1, c1, g8, c8
pub static CASTLES: [CastleGeometry; 4] = [
    geometry(Color::White, true),
    geometry(Color::White, false),
    geometry(Color::Black, true),
    geometry(Color::Black, false),
];

pub fn castle_geometry(color: Color, king_to: u8) -> Option<&'static CastleGeometry> {
    CASTLES
        .iter()
        .find(|c| c.color == color && c.king_to == king_to)
}

fn castle_for(ctx: &MoveContext) -> Result<&'static CastleGeometry, IllegalMove> {
    castle_geometry(ctx.color, ctx.mv.to).ok_or(IllegalMove::CastleBadDestination)
}

fn castle_destination(ctx: &MoveContext) -> Result<(), IllegalMove> {
    castle_for(ctx).map(|_| ())
}

fn castle_source(ctx: &MoveContext) -> Result<(), IllegalMove> {
    let castle = castle_for(ctx)?;
    if ctx.mv.from == castle.king_from && ctx.mover == Some(PieceType::King) {
        Ok(())
    } else {
        Err(IllegalMove::CastleBadSource)
    }
}

fn castle_rights(ctx: &MoveContext) -> Result<(), IllegalMove> {
    let castle = castle_for(ctx)?;
    let rook_home = is_set(
        ctx.board.occupancy.piece_bb(ctx.color, PieceType::Rook),
        castle.rook_from,
    );
    if ctx.board.castle_right(ctx.color, castle.kingside) && rook_home {
        Ok(())
    } else {
        Err(IllegalMove::CastleUnavailable)
    }
}

fn castle_path_clear(ctx: &MoveContext) -> Result<(), IllegalMove> {
    let castle = castle_for(ctx)?;
    if ctx.board.occupancy.occupied() & castle.between == 0 {
        Ok(())
    } else {
        Err(IllegalMove::CastleBlocked)
    }
}

fn castle_path_safe(ctx: &MoveContext) -> Result<(), IllegalMove> {
    let castle = castle_for(ctx)?;
    let enemy = ctx.color.other_color();
    let attacked = set_bit_indices(castle.king_path)
        .any(|sq| is_square_attacked(sq, &ctx.board.occupancy, enemy));
    if attacked {
        Err(IllegalMove::CastleThroughCheck)
    } else {
        Ok(())
    }
}

// =========================================================================
// King safety
// =========================================================================

fn king_is_safe(after: &Occupancy, color: Color) -> Result<(), IllegalMove> {
    match after.king_square(color) {
        Some(king) if is_square_attacked(king, after, color.other_color()) => {
            Err(IllegalMove::LeavesKingInCheck)
        }
        _ => Ok(()),
    }
}

/// Is the side to move currently in check?
pub fn is_in_check(board: &BoardState) -> bool {
    let color = board.active_color;
    board
        .occupancy
        .king_square(color)
        .map_or(false, |king| is_square_attacked(king, &board.occupancy, color.other_color()))
}

// =========================================================================
// Move enumeration
// =========================================================================

/// Destinations of `piece` on `sq` before king safety is considered.
///
/// Pawns capture only onto enemy pieces and push only onto empty squares; a
/// blocked single step also blocks the double step. Castling and en passant are
/// not included.
pub fn pseudo_legal_targets(board: &BoardState, piece: PieceType, color: Color, sq: u8) -> Bitboard {
    let occ = &board.occupancy;
    let occupied = occ.occupied();
    let targets = match piece {
        PieceType::Pawn => {
            let captures = attacks(piece, color, sq, occupied) & occ.color_bb(color.other_color());
            let ahead = match color {
                Color::White => north(sq_to_bb(sq)),
                Color::Black => south(sq_to_bb(sq)),
            };
            let pushes = if ahead & occupied != 0 {
                0
            } else {
                pawn_pushes(color, sq) & !occupied
            };
            captures | pushes
        }
        _ => attacks(piece, color, sq, occupied),
    };
    targets & !occ.color_bb(color)
}

/// Every move worth asking [`validate`] about for the side to move
fn moves_from(board: &BoardState, piece: PieceType, sq: u8) -> Vec<Move> {
    let color = board.active_color;
    let targets = pseudo_legal_targets(board, piece, color, sq);
    let mut moves = Vec::with_capacity(targets.count_ones() as usize);

    for to in set_bit_indices(targets) {
        if piece == PieceType::Pawn && rank_of(to) == color.promotion_rank() {
            moves.extend(PromotionPiece::ALL.iter().map(|&p| Move::promotion(sq, to, p)));
        } else {
            moves.push(Move::normal(sq, to));
        }
    }

    match piece {
        PieceType::Pawn => {
            if let Some(target) = board.en_passant_target {
                if is_set(attacks(piece, color, sq, 0), target) {
                    moves.push(Move::en_passant(sq, target));
                }
            }
        }
        PieceType::King => moves.extend(
            CASTLES
                .iter()
                .filter(|c| c.color == color && c.king_from == sq)
                .map(|c| Move::castle(sq, c.king_to)),
        ),
        _ => {}
    }
    moves
}

pub fn candidate_moves(board: &BoardState) -> Vec<Move> {
    let color = board.active_color;
    PieceType::ALL
        .into_iter()
        .flat_map(|piece| {
            set_bit_indices(board.occupancy.piece_bb(color, piece)).map(move |sq| (piece, sq))
        })
        .flat_map(|(piece, sq)| moves_from(board, piece, sq))
        .collect_vec()
}

pub fn legal_moves(board: &BoardState) -> Vec<Move> {
    candidate_moves(board)
        .into_iter()
        .filter(|&mv| validate(board, mv).is_ok())
        .collect_vec()
}

pub fn has_legal_move(board: &BoardState) -> bool {
    candidate_moves(board)
        .into_iter()
        .any(|mv| validate(board, mv).is_ok())
}
