mod error;
mod executor;
mod key;
pub mod scope;
mod service;

pub use error::{QueryError, ValidationError};
pub use executor::JoinExecutor;
pub use key::{KeyKind, validate_key};
pub use scope::{Scope, ScopeGuard, ScopeProvider, TracingScopes};
pub use service::QueryService;

pub use marquee_pipeline::{Collections, RoleFilter, Stage};
pub use marquee_records::{FieldCoercionError, PrincipalWithPerson, Title};
pub use marquee_store::{PipelineStore, StoreError};
