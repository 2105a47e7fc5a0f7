mod vehicle;

pub use self::vehicle::*;
