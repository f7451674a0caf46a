pub mod order;

pub use order::{LineItem, LineItems, Model as OrderModel, NewOrder, OrderChanges};
