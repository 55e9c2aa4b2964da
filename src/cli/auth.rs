use std::sync::Arc;

use tokio::sync::Mutex;

use crate::{spotify, types::PkceToken};

/// Runs the OAuth PKCE flow end to end. The shared slot is written twice:
/// first with the code verifier the callback handler needs for the token
/// exchange, then with the exchanged token this flow waits for.
pub async fn auth(shared_state: Arc<Mutex<Option<PkceToken>>>) {
    spotify::auth::auth(shared_state).await;
}
