use axum::Router;

use crate::health::health_routes;
use crate::matches::match_routes;
use crate::players::player_routes;
use crate::teams::team_routes;
use crate::AppState;

pub struct ApiRoutes;

impl ApiRoutes {
    pub fn create() -> Router<AppState> {
        Router::<AppState>::new()
            .merge(health_routes())
            .merge(team_routes())
            .merge(player_routes())
            .merge(match_routes())
    }
}
