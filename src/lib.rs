use std::sync::Arc;

mod domain;
mod interfaces;
mod infrastructure;
pub mod errors;
pub mod settings;
pub mod constants;
pub mod graceful_shutdown;

pub use domain::{entities, use_cases};
pub use interfaces::{handlers, repositories, middlewares, routes};
pub use infrastructure::{auth, db, github, utils};

use auth::jwt::JwtService;
use errors::AppError;
use github::client::GithubClient;
use repositories::profile::ProfileRepository;
use use_cases::profile::ProfileHandler;

pub struct AppState {
    pub profile_handler: ProfileHandler,
    pub github: GithubClient,
    pub jwt_service: JwtService,
}

impl AppState {
    pub fn new(
        config: &settings::AppConfig,
        profile_repo: Arc<dyn ProfileRepository>,
    ) -> Result<Self, AppError> {
        Ok(AppState {
            profile_handler: ProfileHandler::new(profile_repo),
            github: GithubClient::new(config)?,
            jwt_service: JwtService::new(config),
        })
    }
}
