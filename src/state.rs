/*
 * Responsibility
 * - Shared context bound to the Router (AppState)
 * - Clone is expected to stay cheap
 *
 * Identity extraction is stateless, so there is nothing to share yet beyond
 * the runtime environment.
 */
use crate::config::AppEnv;

#[derive(Clone, Debug)]
pub struct AppState {
    pub app_env: AppEnv,
}

impl AppState {
    pub fn new(app_env: AppEnv) -> Self {
        Self { app_env }
    }
}
