mod common;
mod user;
mod vehicle;

pub use self::{common::*, user::*, vehicle::*};
