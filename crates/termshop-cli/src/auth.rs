//! Session command handlers.

use termshop_engine::{AuthError, SessionStore};

/// Logs in and stores the session token.
///
/// # Errors
///
/// Returns an error for failures other than rejected credentials, which are
/// reported inline.
pub(crate) async fn run_login(
    session: &SessionStore,
    email: &str,
    password: &str,
) -> anyhow::Result<()> {
    match session.login(email, password).await {
        Ok(user) => println!("SESSION_OPEN: {} <{}>", user.name, user.email),
        Err(AuthError::InvalidCredentials) => println!("Invalid email or password."),
        Err(err) => return Err(err.into()),
    }
    Ok(())
}

/// Creates an account; success is immediately a live session.
///
/// # Errors
///
/// Returns an error if the backend rejects the registration.
pub(crate) async fn run_signup(
    session: &SessionStore,
    name: &str,
    email: &str,
    password: &str,
) -> anyhow::Result<()> {
    let user = session.signup(name, email, password).await?;
    println!("ACCOUNT_CREATED: logged in as {} <{}>", user.name, user.email);
    Ok(())
}

pub(crate) fn run_logout(session: &SessionStore) {
    session.logout();
    println!("SESSION_CLOSED");
}

pub(crate) fn run_whoami(session: &SessionStore) {
    match session.current_user() {
        Some(user) => println!("{} <{}>  role: {}", user.name, user.email, user.role),
        None => println!("No active session."),
    }
}
