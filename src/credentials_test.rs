use super::*;

// =============================================================================
// POLICY
// =============================================================================

#[test]
fn access_policy_lives_seven_days() {
    let policy = CookiePolicy::access(true);
    assert_eq!(policy.max_age, Duration::days(7));
    assert!(policy.secure);
}

#[test]
fn refresh_policy_lives_thirty_days() {
    let policy = CookiePolicy::refresh(false);
    assert_eq!(policy.max_age, Duration::days(30));
    assert!(!policy.secure);
}

// =============================================================================
// COOKIE-BACKED STORE
// =============================================================================

#[test]
fn cookie_set_then_get_round_trips() {
    let mut creds = CookieCredentials::new(CookieJar::new());
    creds.set(ACCESS_COOKIE, "tok-123".into(), CookiePolicy::access(false));
    assert_eq!(creds.get(ACCESS_COOKIE), Some("tok-123".to_owned()));
}

#[test]
fn cookie_set_applies_policy_attributes() {
    let mut creds = CookieCredentials::new(CookieJar::new());
    creds.set(ACCESS_COOKIE, "tok-123".into(), CookiePolicy::access(true));

    let jar = creds.into_jar();
    let cookie = jar.get(ACCESS_COOKIE).expect("cookie should be present");
    assert_eq!(cookie.http_only(), Some(true));
    assert_eq!(cookie.same_site(), Some(SameSite::Strict));
    assert_eq!(cookie.path(), Some("/"));
    assert_eq!(cookie.secure(), Some(true));
    assert_eq!(cookie.max_age(), Some(ACCESS_MAX_AGE));
}

#[test]
fn cookie_secure_flag_follows_policy() {
    let mut creds = CookieCredentials::new(CookieJar::new());
    creds.set(REFRESH_COOKIE, "r-1".into(), CookiePolicy::refresh(false));

    let jar = creds.into_jar();
    let cookie = jar.get(REFRESH_COOKIE).expect("cookie should be present");
    assert_ne!(cookie.secure(), Some(true));
    assert_eq!(cookie.max_age(), Some(REFRESH_MAX_AGE));
}

#[test]
fn cookie_delete_writes_expired_empty_cookie() {
    let mut creds = CookieCredentials::new(CookieJar::new());
    creds.set(ACCESS_COOKIE, "tok-123".into(), CookiePolicy::access(false));
    creds.delete(ACCESS_COOKIE);

    assert_eq!(creds.get(ACCESS_COOKIE), None);

    let jar = creds.into_jar();
    let cookie = jar.get(ACCESS_COOKIE).expect("removal cookie should be present");
    assert_eq!(cookie.value(), "");
    assert_eq!(cookie.max_age(), Some(Duration::ZERO));
}

#[test]
fn cookie_get_ignores_empty_value_from_request() {
    let jar = CookieJar::new().add(Cookie::new(ACCESS_COOKIE, ""));
    let creds = CookieCredentials::new(jar);
    assert_eq!(creds.get(ACCESS_COOKIE), None);
}

#[test]
fn cookie_get_reads_request_jar() {
    let jar = CookieJar::new().add(Cookie::new(REFRESH_COOKIE, "from-browser"));
    let creds = CookieCredentials::new(jar);
    assert_eq!(creds.get(REFRESH_COOKIE), Some("from-browser".to_owned()));
}

// =============================================================================
// IN-MEMORY STORE
// =============================================================================

#[test]
fn memory_store_set_get_delete() {
    let mut creds = MemoryCredentials::new();
    assert_eq!(creds.get(ACCESS_COOKIE), None);

    creds.set(ACCESS_COOKIE, "tok".into(), CookiePolicy::access(false));
    assert_eq!(creds.get(ACCESS_COOKIE), Some("tok".to_owned()));

    creds.delete(ACCESS_COOKIE);
    assert_eq!(creds.get(ACCESS_COOKIE), None);
}

#[test]
fn memory_store_delete_is_idempotent() {
    let mut creds = MemoryCredentials::new();
    creds.delete(REFRESH_COOKIE);
    creds.delete(REFRESH_COOKIE);
    assert_eq!(creds.get(REFRESH_COOKIE), None);
}
