//! Property tests for square notation and move records.

use chess_core::{MoveRecord, Promotion, Square, BOARD_LENGTH};
use proptest::prelude::*;

fn any_square() -> impl Strategy<Value = Square> {
    (0..BOARD_LENGTH, 0..BOARD_LENGTH).prop_map(|(row, col)| Square::new(row, col).unwrap())
}

proptest! {
    #[test]
    fn notation_maps_file_to_column_and_rank_to_row(sq in any_square()) {
        let text = sq.to_notation();
        let bytes = text.as_bytes();
        prop_assert_eq!(bytes[0] - b'a', sq.col());
        prop_assert_eq!(BOARD_LENGTH - (bytes[1] - b'0'), sq.row());
        prop_assert_eq!(Square::from_notation(&text), Some(sq));
    }

    #[test]
    fn out_of_range_coordinates_are_rejected(row in BOARD_LENGTH..=u8::MAX, col in 0..BOARD_LENGTH) {
        prop_assert!(Square::new(row, col).is_none());
        prop_assert!(Square::new(col, row).is_none());
    }

    #[test]
    fn records_survive_json(from in any_square(), to in any_square(), promote in any::<bool>()) {
        let mut record = MoveRecord::new(from, to);
        if promote {
            record = record.with_promotion(Promotion::Knight);
        }
        let json = serde_json::to_string(&record).unwrap();
        let back: MoveRecord = serde_json::from_str(&json).unwrap();
        prop_assert_eq!(back, record);
        prop_assert_eq!(MoveRecord::parse(&record.to_compact()).unwrap(), record);
    }
}
