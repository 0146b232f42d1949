pub mod d410_seller_overview;
