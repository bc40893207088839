mod common;

use booker_api::assertions::assert_alphanumeric_token;
use booker_api::fixtures::{
    empty_credentials, invalid_credentials, long_credentials, password_only,
    special_char_credentials, username_only, valid_credentials,
};
use reqwest::header::COOKIE;

#[tokio::test]
#[ignore = "requires the live booking service; run with --ignored"]
async fn test_valid_credentials_return_token() -> anyhow::Result<()> {
    let session = common::session()?;
    let auth = session.auth();

    let result = auth.create_token(&valid_credentials()).await?;

    assert_eq!(result.status().as_u16(), 200);
    let token = result.data.issued_token().expect("token in response");
    assert_alphanumeric_token(token);
    assert_eq!(session.token_cache().get().as_deref(), Some(token));
    Ok(())
}

#[tokio::test]
#[ignore = "requires the live booking service; run with --ignored"]
async fn test_rejected_credentials_return_200_without_token() -> anyhow::Result<()> {
    let session = common::session()?;
    let auth = session.auth();

    for (label, credentials) in [
        ("invalid", invalid_credentials()),
        ("empty", empty_credentials()),
        ("sql injection", special_char_credentials()),
        ("very long", long_credentials()),
    ] {
        let result = auth.fetch_token(&credentials).await?;
        assert_eq!(result.status().as_u16(), 200, "{} credentials", label);
        assert!(result.data.token.is_none(), "{} credentials got a token", label);
    }

    let partial = [
        ("username only", username_only()),
        ("password only", password_only()),
    ];
    for (label, credentials) in partial {
        let result = auth.fetch_token(&credentials).await?;
        assert_eq!(result.status().as_u16(), 200, "{} credentials", label);
        assert!(result.data.token.is_none(), "{} credentials got a token", label);
    }

    assert!(session.token_cache().is_empty());
    Ok(())
}

#[tokio::test]
#[ignore = "requires the live booking service; run with --ignored"]
async fn test_admin_token_is_cached() -> anyhow::Result<()> {
    let session = common::session()?;
    let auth = session.auth();

    let token1 = auth.get_admin_token().await?;
    let token2 = auth.get_admin_token().await?;

    assert_eq!(token1, token2);
    Ok(())
}

#[tokio::test]
#[ignore = "requires the live booking service; run with --ignored"]
async fn test_clear_cache_then_reacquire() -> anyhow::Result<()> {
    let session = common::session()?;
    let auth = session.auth();

    auth.get_admin_token().await?;
    auth.clear_cache();
    assert!(session.token_cache().is_empty());

    // May or may not be the same value, but it must be issued
    let token = auth.get_admin_token().await?;
    assert_alphanumeric_token(&token);
    Ok(())
}

#[tokio::test]
#[ignore = "requires the live booking service; run with --ignored"]
async fn test_auth_headers_format() -> anyhow::Result<()> {
    let session = common::session()?;

    let headers = session.auth().auth_headers().await?;

    let cookie = headers.get(COOKIE).expect("cookie header").to_str()?;
    let token = cookie.strip_prefix("token=").expect("token= prefix");
    assert_alphanumeric_token(token);
    Ok(())
}
