pub mod change_password;
pub mod delete_account;
pub mod login;
pub mod logout;
pub mod me;
pub mod refresh;
pub mod signup;
pub mod update_profile;

use axum_extra::extract::cookie::Cookie;
use axum_extra::extract::cookie::SameSite;
use chrono::DateTime;
use chrono::Utc;
use serde::Serialize;
use time::Duration;

pub use change_password::change_password;
pub use delete_account::delete_account;
pub use login::login;
pub use logout::logout;
pub use me::me;
pub use refresh::refresh;
pub use signup::signup;
pub use update_profile::update_profile;

use crate::domain::user::models::User;
use crate::domain::user::models::UserPreferences;

pub const REFRESH_COOKIE: &str = "refreshToken";

/// HttpOnly cookie carrying the refresh token.
///
/// Cross-site requests from the frontend only send `SameSite=None` cookies,
/// which browsers in turn only accept when `Secure` is set. `max_age` should
/// match the refresh token lifetime so the cookie outlives the browser session.
pub fn refresh_cookie(token: String, secure: bool, max_age: Duration) -> Cookie<'static> {
    let same_site = if secure { SameSite::None } else { SameSite::Lax };

    Cookie::build((REFRESH_COOKIE, token))
        .http_only(true)
        .path("/")
        .secure(secure)
        .same_site(same_site)
        .max_age(max_age)
        .build()
}

/// Cookie used to clear the refresh token. Path must match [`refresh_cookie`].
pub fn expired_refresh_cookie() -> Cookie<'static> {
    Cookie::build((REFRESH_COOKIE, "")).path("/").build()
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserData {
    pub id: String,
    pub email: String,
    pub name: Option<String>,
    pub role: &'static str,
    pub preferences: UserPreferences,
    pub created_at: DateTime<Utc>,
}

impl From<&User> for UserData {
    fn from(user: &User) -> Self {
        Self {
            id: user.id.to_string(),
            email: user.email.as_str().to_string(),
            name: user.name.as_ref().map(|n| n.as_str().to_string()),
            role: user.role.as_str(),
            preferences: user.preferences,
            created_at: user.created_at,
        }
    }
}

/// `{user}`
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UserResponseData {
    pub user: UserData,
}

/// `{user, token}` returned by signup and login.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SessionResponseData {
    pub user: UserData,
    pub token: String,
}
