use crate::{config::Config, services::QuizService};
use axum::extract::FromRef;

#[derive(Clone)]
pub struct AppState {
    pub quiz_service: QuizService,
    pub config: Config,
}

impl FromRef<AppState> for QuizService {
    fn from_ref(state: &AppState) -> Self {
        state.quiz_service.clone()
    }
}

impl FromRef<AppState> for Config {
    fn from_ref(state: &AppState) -> Self {
        state.config.clone()
    }
}
