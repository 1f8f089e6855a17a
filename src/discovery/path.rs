/// Join an optional prefix and a route path into the registered path.
///
/// Both parts are trimmed of leading and trailing slashes (only slashes;
/// whitespace and pattern syntax pass through verbatim):
///
/// | prefix    | path       | result        |
/// |-----------|------------|---------------|
/// | `""`      | `""`       | `/`           |
/// | `"api"`   | `"users"`  | `/api/users`  |
/// | `"/api/"` | `"/users/"`| `/api/users`  |
/// | `""`      | `"users"`  | `/users`      |
/// | `"api"`   | `""`       | `/api`        |
#[must_use]
pub fn build_route_path(prefix: Option<&str>, path: &str) -> String {
    let prefix = prefix.unwrap_or_default().trim_matches('/');
    let path = path.trim_matches('/');

    match (prefix.is_empty(), path.is_empty()) {
        (true, true) => "/".to_string(),
        (true, false) => format!("/{path}"),
        (false, true) => format!("/{prefix}"),
        (false, false) => format!("/{prefix}/{path}"),
    }
}
