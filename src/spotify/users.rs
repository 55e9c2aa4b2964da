use crate::{config, spotify, spotify::FetchError, types::User};

/// Retrieves the profile of the authenticated user.
///
/// Fetched once per session; the id is what playlist ownership is compared
/// against, the display name is presentation only.
pub async fn get_current_user(token: &str) -> Result<User, FetchError> {
    let api_url = format!("{uri}/me", uri = &config::spotify_apiurl());
    let user = spotify::get_json::<User>(token, &api_url).await?;
    Ok(user)
}
