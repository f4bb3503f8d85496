use crate::api_state::ApiContext;
use crate::routes::auth::error::AuthError;
use crate::routes::auth::service::session_user;
use axum::extract::{FromRequestParts, State};
use axum::http::request::Parts;
use axum_extra::extract::cookie::CookieJar;
use color_eyre::eyre::eyre;
use common_gallery::User;

/// Required identity: rejects with 401 when the session cookie is absent,
/// unknown, or expired.
#[derive(Clone, Debug)]
pub struct CurrentUser(pub User);

/// Optional identity for visibility-scoped reads; an invalid session is
/// treated as anonymous.
#[derive(Clone, Debug)]
pub struct MaybeUser(pub Option<User>);

async fn extract_context<S>(parts: &mut Parts, state: &S) -> Result<ApiContext, AuthError>
where
    S: Send + Sync,
    State<ApiContext>: FromRequestParts<S>,
{
    match State::<ApiContext>::from_request_parts(parts, state).await {
        Ok(State(context)) => Ok(context),
        Err(_e) => Err(AuthError::Internal(eyre!(
            "Server state is not configured correctly."
        ))),
    }
}

fn extract_session_cookie(parts: &Parts, cookie_name: &str) -> Option<String> {
    let jar = CookieJar::from_headers(&parts.headers);
    jar.get(cookie_name).map(|c| c.value().to_owned())
}

impl<S> FromRequestParts<S> for CurrentUser
where
    S: Send + Sync,
    State<ApiContext>: FromRequestParts<S>,
{
    type Rejection = AuthError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let context = extract_context(parts, state).await?;
        let token = extract_session_cookie(parts, &context.settings.auth.session_cookie)
            .ok_or(AuthError::MissingSession)?;

        let user = session_user(&context.pool, &token)
            .await?
            .ok_or(AuthError::InvalidSession)?;

        parts.extensions.insert(user.clone());
        Ok(Self(user))
    }
}

impl<S> FromRequestParts<S> for MaybeUser
where
    S: Send + Sync,
    State<ApiContext>: FromRequestParts<S>,
{
    type Rejection = AuthError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let context = extract_context(parts, state).await?;
        let Some(token) = extract_session_cookie(parts, &context.settings.auth.session_cookie)
        else {
            return Ok(Self(None));
        };

        let user = session_user(&context.pool, &token).await?;
        if let Some(user) = &user {
            parts.extensions.insert(user.clone());
        }
        Ok(Self(user))
    }
}
