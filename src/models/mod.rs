//! 99 API resource types and the services that operate on them.

mod company;
mod cost_center;
mod employee;
mod user;

pub use company::*;
pub use cost_center::*;
pub use employee::*;
pub use user::*;

// serde `skip_serializing_if` helpers for fields the API omits when unset.

fn is_zero(v: &i64) -> bool {
    *v == 0
}

fn is_false(v: &bool) -> bool {
    !*v
}
