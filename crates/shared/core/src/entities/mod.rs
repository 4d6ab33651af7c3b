mod market;
mod order;
mod side;

pub use market::Market;
pub use order::Order;
pub use side::Side;
