pub mod accrual;
pub mod borrow;
pub mod lend;
pub mod settlement;
