//! Authentication test helpers
//!
//! Provides utilities for creating test owners and generating tokens.

#[cfg(feature = "ssr")]
use sqlx::PgPool;
#[cfg(feature = "ssr")]
use uuid::Uuid;
#[cfg(feature = "ssr")]
use parkeasy::backend::auth::sessions::create_token;
#[cfg(feature = "ssr")]
use parkeasy::backend::auth::users::create_user;
#[cfg(feature = "ssr")]
use parkeasy::backend::server::AuthConfig;

/// Password used for every test owner
pub const TEST_PASSWORD: &str = "test_password_123";

/// Test owner credentials
pub struct TestOwner {
    pub id: String,
    pub email: String,
    pub password: String,
    pub token: String,
}

/// Token for a random user id, signed with the development secret
///
/// Without a database the middleware does not look the user up, so this is
/// enough to get past it.
#[cfg(feature = "ssr")]
pub fn owner_token() -> (Uuid, String) {
    let id = Uuid::new_v4();
    let token = create_token(&AuthConfig::default(), id, "owner@example.com", "Owner")
        .expect("Failed to create test token");
    (id, token)
}

/// Create an owner in the database with a unique email
#[cfg(feature = "ssr")]
pub async fn create_test_owner(
    pool: &PgPool,
    config: &AuthConfig,
) -> Result<TestOwner, Box<dyn std::error::Error>> {
    let email = format!("owner_{}@example.com", Uuid::new_v4().simple());
    let password_hash = bcrypt::hash(TEST_PASSWORD, 4)?;

    let user = create_user(pool, "Test Owner", &email, &password_hash).await?;
    let token = create_token(config, user.id, &user.email, &user.name)?;

    Ok(TestOwner {
        id: user.id.to_string(),
        email: user.email,
        password: TEST_PASSWORD.to_string(),
        token,
    })
}
