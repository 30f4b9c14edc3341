pub mod vault_state;
pub use vault_state::*;

pub mod position;
pub use position::*;

pub mod price_feed;
pub use price_feed::*;
