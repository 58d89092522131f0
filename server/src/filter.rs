//! Substring filtering of person records.

use search_core::User;

/// Keep users whose name or biography contains `query`, case-sensitively,
/// in their original order. An empty query keeps everyone.
pub fn filter_users(users: Vec<User>, query: &str) -> Vec<User> {
    if query.is_empty() {
        return users;
    }
    users
        .into_iter()
        .filter(|user| user.name.contains(query) || user.about.contains(query))
        .collect()
}
