pub mod dashboards;
pub mod domain;
pub mod enums;
pub mod reports;
pub mod shared;
