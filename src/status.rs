use crate::board::BoardState;
use crate::legality::{has_legal_move, is_in_check};
use crate::types::Terminal;

/// Checkmate or stalemate for the side to move, otherwise [`Terminal::None`].
///
/// Draws by repetition, the fifty-move rule or insufficient material are the
/// caller's business.
pub fn is_terminal(board: &BoardState) -> Terminal {
    if has_legal_move(board) {
        Terminal::None
    } else if is_in_check(board) {
        Terminal::Checkmate
    } else {
        Terminal::Stalemate
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn status(fen: &str) -> Terminal {
        is_terminal(&BoardState::from_fen(fen).unwrap())
    }

    #[test]
    fn test_start_position_is_not_terminal() {
        assert_eq!(is_terminal(&BoardState::new()), Terminal::None);
    }

    #[test]
    fn test_checkmate_1() {
        // . . . . . . . .
        // . . . . . . . .
        // . . . . . . . .
        // . . . . . . . .
        // . . . . . . . .
        // . . ♔ . . . . .
        // . ♕ . . . . . .
        // . ♚ . . . . . .
        assert_eq!(status("8/8/8/8/8/2K5/1Q6/1k6 b - - 0 1"), Terminal::Checkmate);
    }

    #[test]
    fn test_checkmate_2() {
        // the king cannot retreat to h1, the rook sees it once h2 is vacated
        assert_eq!(status("8/8/8/8/7r/8/5k1K/8 w - - 0 1"), Terminal::Checkmate);
    }

    #[test]
    fn test_protected_queen_mate() {
        assert_eq!(status("8/8/8/8/8/4k3/4q3/4K3 w - - 0 1"), Terminal::Checkmate);
        // same picture without the protecting king: Kxe2 escapes
        assert_eq!(status("8/8/8/8/8/8/4q3/4K2k w - - 0 1"), Terminal::None);
    }

    #[test]
    fn test_stalemate_1() {
        // . . . . . . . ♔
        // . . . . . . . .
        // . . . . . . . .
        // . . . . . . . .
        // . . . . . . . .
        // . . . . . . . .
        // . . ♕ . . . . .
        // ♚ . . . . . . .
        assert_eq!(status("7K/8/8/8/8/8/2Q5/k7 b - - 0 1"), Terminal::Stalemate);
        assert_eq!(status("7k/5K2/6Q1/8/8/8/8/8 b - - 0 1"), Terminal::Stalemate);
    }

    #[test]
    fn test_stalemate_with_pawn() {
        assert_eq!(status("8/8/8/8/8/6k1/7p/7K w - - 0 1"), Terminal::Stalemate);
    }

    #[test]
    fn test_check_with_escape_is_not_terminal() {
        assert_eq!(status("4k3/8/8/8/8/8/8/R3K3 b - - 0 1"), Terminal::None);
        assert_eq!(status("4r1k1/8/8/8/8/8/8/4K3 w - - 0 1"), Terminal::None);
    }
}
