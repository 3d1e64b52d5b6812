/// Checks a presented credential against the configured shared secret.
///
/// Exact string equality, applied on every privileged request; no sessions or
/// derived tokens exist. `None` means no secret is configured and every
/// candidate is denied, including the empty string.
pub fn verify_admin_password(candidate: &str, expected: Option<&str>) -> bool {
    match expected {
        Some(expected) => candidate == expected,
        None => false,
    }
}
