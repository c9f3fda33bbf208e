use actix_web::HttpResponse;

use auth_middleware::Authenticated;

pub async fn read(user: Authenticated) -> HttpResponse {
    HttpResponse::Ok()
        .content_type("text/plain")
        .body(format!("read {}'s resource", user.subject()))
}

pub async fn write(user: Authenticated) -> HttpResponse {
    HttpResponse::Ok()
        .content_type("text/plain")
        .body(format!("wrote {}'s resource", user.subject()))
}
