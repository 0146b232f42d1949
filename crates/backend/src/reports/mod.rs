pub mod r510_seller_report;
