use std::sync::Arc;

use rumbo_core::geocode::Gazetteer;
use rumbo_core::model::StreetGraph;
use rumbo_core::tracking::GuideEngine;

#[derive(Clone)]
pub struct AppState {
    pub engine: Arc<GuideEngine>,
    pub gazetteer: Arc<Gazetteer>,
}

impl AppState {
    pub fn new(graph: StreetGraph, gazetteer: Gazetteer) -> Self {
        Self {
            engine: Arc::new(GuideEngine::new(graph)),
            gazetteer: Arc::new(gazetteer),
        }
    }
}
