use actix_web::{web, HttpResponse, Responder};
use tracing::instrument;

use crate::{errors::AppError, AppState};

#[instrument(skip(state))]
pub async fn get_github_repositories(
    username: web::Path<String>,
    state: web::Data<AppState>,
) -> Result<impl Responder, AppError> {
    let repositories = state.github.fetch_repositories(&username).await?;
    Ok(HttpResponse::Ok().json(repositories))
}
