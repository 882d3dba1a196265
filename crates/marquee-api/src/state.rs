use std::sync::Arc;
use std::time::Duration;

use marquee_service::{PipelineStore, QueryService};

pub type SharedService = QueryService<Arc<dyn PipelineStore>>;

#[derive(Clone)]
pub struct AppState {
    pub service: Arc<SharedService>,
    pub request_timeout: Duration,
}
