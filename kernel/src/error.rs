use std::fmt::Display;

use error_stack::Context;

#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum KernelError {
    Validation,
    AgeLimitExceeded,
    NotFound,
    AlreadyRented,
    UserAlreadyRenting,
    NotRented,
    NotRenter,
    Concurrency,
    Timeout,
    Internal,
}

impl KernelError {
    /// Business rule violations and malformed input, as opposed to store failures.
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            KernelError::Validation
                | KernelError::AgeLimitExceeded
                | KernelError::NotFound
                | KernelError::AlreadyRented
                | KernelError::UserAlreadyRenting
                | KernelError::NotRented
                | KernelError::NotRenter
        )
    }
}

impl Display for KernelError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            KernelError::Validation => write!(f, "Invalid request"),
            KernelError::AgeLimitExceeded => {
                write!(f, "The vehicle cannot be more than 5 years old")
            }
            KernelError::NotFound => write!(f, "Vehicle not found"),
            KernelError::AlreadyRented => write!(f, "The vehicle is already rented"),
            KernelError::UserAlreadyRenting => write!(f, "The user already has a rented vehicle"),
            KernelError::NotRented => write!(f, "The vehicle is not rented"),
            KernelError::NotRenter => {
                write!(f, "Only the user who rented the vehicle can return it")
            }
            KernelError::Concurrency => write!(f, "Concurrency error"),
            KernelError::Timeout => write!(f, "Process timed out"),
            KernelError::Internal => write!(f, "Internal kernel error"),
        }
    }
}

impl Context for KernelError {}
