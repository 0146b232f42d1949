// Dashboard handlers (d410)
pub mod d410_seller_overview;

// Report handlers (r510)
pub mod r510_seller_report;
