//! Stable ordering of filtered records.

use std::cmp::Ordering;

use search_core::User;

use crate::query::{Direction, OrderField, Sort};

/// Reorder `users` in place. Ties keep their incoming order in both
/// directions, since `sort_by` is stable.
pub fn sort_users(users: &mut [User], sort: Sort) {
    let Sort::By(field, direction) = sort else {
        return;
    };
    users.sort_by(|a, b| {
        let ord = compare(a, b, field);
        match direction {
            Direction::Asc => ord,
            Direction::Desc => ord.reverse(),
        }
    });
}

fn compare(a: &User, b: &User, field: OrderField) -> Ordering {
    match field {
        OrderField::Id => a.id.cmp(&b.id),
        OrderField::Name => a.name.cmp(&b.name),
        OrderField::Age => a.age.cmp(&b.age),
    }
}
