use actix_web::web;

use crate::handlers::{github, profiles};

pub fn config_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/profile")
            .service(
                web::resource("")
                    .route(web::get().to(profiles::get_all_profiles))
                    .route(web::post().to(profiles::upsert_profile))
                    .route(web::delete().to(profiles::delete_account))
            )
            .service(
                web::resource("/me")
                    .route(web::get().to(profiles::get_own_profile))
            )
            .service(
                web::resource("/user/{user_id}")
                    .route(web::get().to(profiles::get_profile_by_user))
            )
            .service(
                web::resource("/experience")
                    .route(web::put().to(profiles::add_experience))
            )
            .service(
                web::resource("/experience/{exp_id}")
                    .route(web::delete().to(profiles::delete_experience))
            )
            .service(
                web::resource("/education")
                    .route(web::put().to(profiles::add_education))
            )
            .service(
                web::resource("/education/{edu_id}")
                    .route(web::delete().to(profiles::delete_education))
            )
            .service(
                web::resource("/github/{username}")
                    .route(web::get().to(github::get_github_repositories))
            )
    );
}
