pub mod convert;
mod error;
mod mapper;
mod model;

pub use error::{CoercionFailure, FieldCoercionError};
pub use mapper::{map_principal, map_principals, map_title, map_titles};
pub use model::{PrincipalWithPerson, Title};
