//! Windowing of the sorted result.

use search_core::User;

/// The records sent back and whether any follow them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Page {
    pub users: Vec<User>,
    pub has_more: bool,
}

/// Cut `[offset, offset + limit)` out of `users`.
///
/// When fewer than `offset + limit` records exist, or either bound is
/// negative, the whole sequence comes back from index 0 with the offset
/// ignored and `has_more` false. Clients rely on this exact behaviour.
pub fn paginate(mut users: Vec<User>, offset: i64, limit: i64) -> Page {
    let len = users.len();
    let window = usize::try_from(offset)
        .ok()
        .zip(usize::try_from(limit).ok())
        .and_then(|(start, count)| Some((start, start.checked_add(count)?)))
        .filter(|&(_, end)| end <= len);

    match window {
        Some((start, end)) => {
            users.truncate(end);
            users.drain(..start);
            Page {
                users,
                has_more: len > end,
            }
        }
        None => Page {
            users,
            has_more: false,
        },
    }
}
