mod compose;
pub mod fields;
mod filter;
mod operator;
mod role;
mod stage;

pub use compose::{Aggregation, Collections, JoinShape, compose};
pub use filter::Filter;
pub use operator::Operator;
pub use role::{CAST_CATEGORIES, RoleFilter};
pub use stage::{Lookup, Projection, Stage};
