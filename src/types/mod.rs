pub mod account;
pub mod alert;
pub mod position;
pub mod scenario;
pub mod trade;

pub use account::*;
pub use alert::*;
pub use position::*;
pub use scenario::*;
pub use trade::*;
