// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

/**
 * Bountyy Oy - Anti-Forgery Token Fetcher
 * Pulls the csrf_token value off the login page before an attempt
 *
 * @copyright 2026 Bountyy Oy
 * @license Proprietary
 */

use once_cell::sync::Lazy;
use scraper::{Html, Selector};

use crate::errors::NetworkError;
use crate::transport::LoginClient;

/// Form field name the token is submitted under
pub const CSRF_FIELD: &str = "csrf_token";

static CSRF_INPUT: Lazy<Selector> =
    Lazy::new(|| Selector::parse(r#"input[name="csrf_token"]"#).unwrap());

/// Fetch the login page and extract the anti-forgery token, if any.
///
/// A page without the token element is not an error; the login POST simply
/// omits the field. Network failures propagate like any other transport
/// failure and abort only this attempt.
pub async fn fetch_csrf_token(client: &LoginClient) -> Result<Option<String>, NetworkError> {
    let page = client.fetch_login_page().await?;
    Ok(extract_csrf_token(&page.body))
}

/// Extract the value of `<input name="csrf_token">` from markup.
///
/// Parsing is lenient: markup the parser cannot make sense of degrades to
/// "no token" rather than failing the attempt.
pub fn extract_csrf_token(html: &str) -> Option<String> {
    let document = Html::parse_document(html);
    document
        .select(&CSRF_INPUT)
        .next()
        .and_then(|input| input.value().attr("value"))
        .map(str::to_string)
}
