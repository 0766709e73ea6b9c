mod handlers;

use std::net::SocketAddr;
use std::sync::Arc;

use axum::{
    extract::Extension,
    routing::{get, post},
    Router,
};

use crate::api::{DynAPI, API};
use crate::server::handlers::{places, users};

pub async fn serve<T: API + Sync + Send + 'static>(api: T) {
    let api = Arc::new(api) as DynAPI;

    let app = Router::new()
        .route("/places", post(places::create))
        .route(
            "/places/:id",
            get(places::find)
                .patch(places::update)
                .delete(places::remove),
        )
        .route("/places/user/:user_id", get(places::find_by_creator))
        .route("/users", get(users::list))
        .route("/users/signup", post(users::signup))
        .route("/users/login", post(users::login))
        .layer(Extension(api));

    let addr = SocketAddr::from(([127, 0, 0, 1], 3000));

    tracing::info!("listening on {}", addr);

    axum::Server::bind(&addr)
        .serve(app.into_make_service())
        .await
        .unwrap();
}
