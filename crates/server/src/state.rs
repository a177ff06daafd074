use std::sync::Arc;

use common::geo::RouteClient;
use service::DataStore;

#[derive(Clone)]
pub struct ServerState {
    pub store: Arc<DataStore>,
    pub routes: Arc<RouteClient>,
}
