/// Sanitized hostname for use in output file names.
///
/// Characters outside `[A-Za-z0-9_-]` are replaced with underscores; if the
/// hostname cannot be determined at all, a fixed placeholder is returned.
pub fn safe_hostname() -> String {
    match hostname::get() {
        Ok(name) => name
            .to_string_lossy()
            .chars()
            .map(|c| if c.is_alphanumeric() || c == '_' || c == '-' { c } else { '_' })
            .collect(),
        Err(_) => "UnknownComputer".to_string(),
    }
}
