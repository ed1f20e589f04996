pub mod d100_order_summary;
