use actix_web::{web, HttpResponse, Responder};
use tracing::instrument;

use crate::{
    constants::USER_DELETED,
    entities::{education::NewEducation, experience::NewExperience, profile::ProfileInput},
    errors::AppError,
    use_cases::extractors::AuthUser,
    AppState,
};

#[instrument(skip(state))]
pub async fn get_own_profile(
    user: AuthUser,
    state: web::Data<AppState>,
) -> Result<impl Responder, AppError> {
    let profile = state.profile_handler.get_own_profile(user.id()).await?;
    Ok(HttpResponse::Ok().json(profile))
}

#[instrument(skip(state, data))]
pub async fn upsert_profile(
    user: AuthUser,
    state: web::Data<AppState>,
    data: web::Json<ProfileInput>,
) -> Result<impl Responder, AppError> {
    let profile = state.profile_handler
        .upsert_profile(user.id(), data.into_inner())
        .await?;
    Ok(HttpResponse::Ok().json(profile))
}

#[instrument(skip(state))]
pub async fn get_all_profiles(
    state: web::Data<AppState>,
) -> Result<impl Responder, AppError> {
    let profiles = state.profile_handler.list_profiles().await?;
    Ok(HttpResponse::Ok().json(profiles))
}

#[instrument(skip(state))]
pub async fn get_profile_by_user(
    user_id: web::Path<String>,
    state: web::Data<AppState>,
) -> Result<impl Responder, AppError> {
    let profile = state.profile_handler.get_profile_by_user(&user_id).await?;
    Ok(HttpResponse::Ok().json(profile))
}

#[instrument(skip(state))]
pub async fn delete_account(
    user: AuthUser,
    state: web::Data<AppState>,
) -> Result<impl Responder, AppError> {
    state.profile_handler.delete_account(user.id()).await?;
    Ok(HttpResponse::Ok().json(serde_json::json!({ "msg": USER_DELETED })))
}

#[instrument(skip(state, data))]
pub async fn add_experience(
    user: AuthUser,
    state: web::Data<AppState>,
    data: web::Json<NewExperience>,
) -> Result<impl Responder, AppError> {
    let profile = state.profile_handler
        .add_experience(user.id(), data.into_inner())
        .await?;
    Ok(HttpResponse::Ok().json(profile))
}

#[instrument(skip(state))]
pub async fn delete_experience(
    user: AuthUser,
    exp_id: web::Path<String>,
    state: web::Data<AppState>,
) -> Result<impl Responder, AppError> {
    let profile = state.profile_handler
        .remove_experience(user.id(), &exp_id)
        .await?;
    Ok(HttpResponse::Ok().json(profile))
}

#[instrument(skip(state, data))]
pub async fn add_education(
    user: AuthUser,
    state: web::Data<AppState>,
    data: web::Json<NewEducation>,
) -> Result<impl Responder, AppError> {
    let profile = state.profile_handler
        .add_education(user.id(), data.into_inner())
        .await?;
    Ok(HttpResponse::Ok().json(profile))
}

#[instrument(skip(state))]
pub async fn delete_education(
    user: AuthUser,
    edu_id: web::Path<String>,
    state: web::Data<AppState>,
) -> Result<impl Responder, AppError> {
    let profile = state.profile_handler
        .remove_education(user.id(), &edu_id)
        .await?;
    Ok(HttpResponse::Ok().json(profile))
}
