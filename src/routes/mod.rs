use crate::types::error::AppError;
use crate::utils::webutils::validate_token;
use actix_web::web;
use actix_web_httpauth::middleware::HttpAuthentication;

pub mod auth;
pub mod groups;
pub mod hall_of_fame;
pub mod health;
pub mod items;
pub mod rankings;
pub mod stocks;
pub mod users;

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    let user_auth = HttpAuthentication::bearer(validate_token);

    cfg.app_data(
        web::JsonConfig::default()
            .error_handler(|err, _req| AppError::BadRequest(err.to_string()).into()),
    );
    cfg.app_data(
        web::QueryConfig::default()
            .error_handler(|err, _req| AppError::BadRequest(err.to_string()).into()),
    );

    cfg.service(
        web::scope("/api")
            .service(web::scope("/health").service(health::health))
            .service(
                web::scope("/auth")
                    .service(auth::send_code::send_code)
                    .service(auth::verify_code::verify_code)
                    .service(auth::register::register)
                    .service(auth::login::login)
                    .service(auth::reset_password::reset_password)
            )
            .service(web::scope("/rankings").service(rankings::list))
            .service(web::scope("/hall-of-fame").service(hall_of_fame::list))
            .service(web::scope("/stocks").service(stocks::list))
            .service(
                web::scope("/users")
                    .service(users::me)
                    .service(users::update_me)
                    .service(users::profile)
                    .wrap(user_auth.clone())
            )
            .service(
                web::scope("/items")
                    .service(items::create)
                    .service(items::list)
                    .service(items::delete)
                    .wrap(user_auth.clone())
            )
            .service(
                web::scope("/groups")
                    .service(groups::create::create)
                    .service(groups::join::join)
                    .service(groups::list::list)
                    .service(groups::detail::detail)
                    .service(groups::leave::remove_member)
                    .service(groups::delete::delete)
                    .wrap(user_auth)
            )
    );
}
