use crate::api_state::ApiContext;
use crate::routes::auth::error::AuthError;
use crate::routes::auth::interfaces::LoginRequest;
use crate::routes::auth::middleware::CurrentUser;
use crate::routes::auth::service::{
    authenticate_user, create_session, delete_session, register_user,
};
use axum::extract::State;
use axum::Json;
use axum_extra::extract::cookie::{Cookie, CookieJar};
use common_gallery::User;

/// Log in with username and password; with `create` set, register first.
/// Establishes a server-side session delivered as an http-only cookie.
#[utoipa::path(
    post,
    path = "/auth/local",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Session established."),
        (status = 401, description = "Invalid credentials."),
        (status = 409, description = "Username is already taken."),
    )
)]
pub async fn login(
    State(context): State<ApiContext>,
    jar: CookieJar,
    Json(payload): Json<LoginRequest>,
) -> Result<(CookieJar, &'static str), AuthError> {
    let user = if payload.create {
        register_user(&context.pool, &payload.username, &payload.password).await?
    } else {
        authenticate_user(&context.pool, &payload.username, &payload.password).await?
    };

    let token = create_session(
        &context.pool,
        user.id,
        context.settings.auth.session_expiry_days,
    )
    .await?;

    let mut cookie = Cookie::new(context.settings.auth.session_cookie.clone(), token);
    cookie.set_path("/");
    cookie.set_http_only(true);

    Ok((jar.add(cookie), "OK"))
}

/// Delete the server-side session and clear the cookie.
#[utoipa::path(
    get,
    path = "/auth/logout",
    responses((status = 200, description = "Session cleared."))
)]
pub async fn logout(
    State(context): State<ApiContext>,
    jar: CookieJar,
) -> Result<(CookieJar, &'static str), AuthError> {
    let cookie_name = context.settings.auth.session_cookie.clone();
    if let Some(cookie) = jar.get(&cookie_name) {
        delete_session(&context.pool, cookie.value()).await?;
    }
    Ok((jar.remove(Cookie::from(cookie_name)), "OK"))
}

/// The currently authenticated user.
#[utoipa::path(
    get,
    path = "/auth/me",
    responses(
        (status = 200, description = "The current user.", body = User),
        (status = 401, description = "Not logged in."),
    )
)]
pub async fn me(CurrentUser(user): CurrentUser) -> Json<User> {
    Json(user)
}
