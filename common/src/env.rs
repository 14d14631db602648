/// Reads a numeric environment variable. Returns `None` when unset; an
/// unparsable value is a misconfiguration and panics at startup.
pub fn get_env_usize(key: &str) -> Option<usize> {
    let value = std::env::var(key).ok()?;

    let parsed = value
        .parse::<usize>()
        .unwrap_or_else(|_| panic!("{} must be a positive number, got '{}'", key, value));

    Some(parsed)
}
