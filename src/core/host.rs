//! Host identity used for the `System` field

use std::io;

/// Substituted when the host name cannot be determined.
pub const UNKNOWN_SYSTEM: &str = "unknown";

/// Ask the operating system for the host name.
pub fn hostname() -> io::Result<String> {
    let name = ::hostname::get()?
        .into_string()
        .map_err(|_| io::Error::new(io::ErrorKind::InvalidData, "host name is not valid UTF-8"))?;

    let name = name.trim();
    if name.is_empty() {
        return Err(io::Error::new(io::ErrorKind::NotFound, "empty host name"));
    }
    Ok(name.to_string())
}

/// Resolve a host name with `supplier`, falling back to `"unknown"`.
pub fn system_name_from<F>(supplier: F) -> String
where
    F: FnOnce() -> io::Result<String>,
{
    supplier().unwrap_or_else(|_| UNKNOWN_SYSTEM.to_string())
}

/// The host name of this machine, or `"unknown"`.
pub fn system_name() -> String {
    system_name_from(hostname)
}
