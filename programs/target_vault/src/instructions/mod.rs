pub mod initialize_vault;
pub use initialize_vault::*;

pub mod deposit;
pub use deposit::*;

pub mod withdraw;
pub use withdraw::*;

pub mod emergency_withdraw;
pub use emergency_withdraw::*;

pub mod emergency_withdraw_batch;
pub use emergency_withdraw_batch::*;

pub mod views;
pub use views::*;
