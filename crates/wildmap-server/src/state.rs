use std::sync::Arc;

use wildmap_services::AnnotationService;

#[derive(Clone)]
pub struct AppState {
    pub annotations: Arc<AnnotationService>,
}

impl AppState {
    pub fn new(annotations: Arc<AnnotationService>) -> Self {
        Self { annotations }
    }
}
