//! Piece tests - shapes, rotation, and wall kicks

use blockfall::core::{try_rotate_cw, Board, Piece};
use blockfall::types::{Cell, ShapeKind, BOARD_HEIGHT, BOARD_WIDTH, SPAWN_X, SPAWN_Y};

#[test]
fn test_spawn_anchor_is_horizontal_center() {
    for kind in ShapeKind::ALL {
        let piece = Piece::spawn(kind);
        assert_eq!((piece.x, piece.y), (SPAWN_X, SPAWN_Y));
    }
}

#[test]
fn test_rotation_is_a_group_action_of_order_four() {
    for kind in ShapeKind::ALL {
        let piece = Piece::spawn(kind);
        let mut rotated = piece;
        for _ in 0..4 {
            rotated = rotated.rotated_cw();
        }
        assert_eq!(rotated.cells, piece.cells, "shape {:?}", kind);
    }
}

#[test]
fn test_single_rotation_changes_asymmetric_shapes() {
    let piece = Piece::spawn(ShapeKind::I);
    assert_ne!(piece.rotated_cw().cells, piece.cells);

    let piece = Piece::spawn(ShapeKind::T);
    assert_ne!(piece.rotated_cw().cells, piece.cells);
}

#[test]
fn test_wall_kick_is_deterministic_at_left_wall() {
    let board = Board::new();

    // A vertical I (occupying matrix column 2) hugging the left wall.
    let mut piece = Piece::spawn(ShapeKind::I).rotated_cw();
    piece.x = -2;
    piece.y = 5;
    assert!(!board.collides(&piece));

    // The naive rotation spans x = -2..=1; offsets -1 and +1 still clip the
    // wall, -2 is worse, so +2 is the first offset that clears.
    let rotated = try_rotate_cw(&piece, |p| board.collides(p)).unwrap();
    assert_eq!(rotated.x, 0);

    // Same inputs, same answer.
    let again = try_rotate_cw(&piece, |p| board.collides(p)).unwrap();
    assert_eq!(again, rotated);
}

#[test]
fn test_rejected_rotation_changes_nothing() {
    let mut board = Board::new();
    // Solid board except a single free column at x = 4.
    for y in 0..BOARD_HEIGHT as i8 {
        for x in 0..BOARD_WIDTH as i8 {
            if x != 4 {
                board.set(x, y, Cell::Locked(ShapeKind::I));
            }
        }
    }

    // A vertical I inside the well; any horizontal rotation candidate spans
    // four columns and must hit the walls of the well at every kick offset.
    let mut piece = Piece::spawn(ShapeKind::I).rotated_cw();
    piece.x = 2;
    piece.y = 5;
    assert!(!board.collides(&piece));

    assert!(try_rotate_cw(&piece, |p| board.collides(p)).is_none());
}

#[test]
fn test_every_shape_occupies_four_cells_within_matrix() {
    for kind in ShapeKind::ALL {
        let piece = Piece::spawn(kind);
        assert_eq!(piece.occupied().count(), 4);
        for (x, y) in piece.occupied() {
            assert!(x >= piece.x && x < piece.x + 4);
            assert!(y >= piece.y && y < piece.y + 4);
        }
    }
}

#[test]
fn test_spawned_pieces_fit_the_board_width() {
    // Every spawned shape sits fully inside the playfield.
    for kind in ShapeKind::ALL {
        let piece = Piece::spawn(kind);
        for (x, y) in piece.occupied() {
            assert!((0..BOARD_WIDTH as i8).contains(&x), "shape {:?}", kind);
            assert!((0..BOARD_HEIGHT as i8).contains(&y), "shape {:?}", kind);
        }
    }
}
