use thiserror::Error;

use crate::scalar::ScalarKind;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum SpecializationError {
    #[error("constant {index} is out of range, the map holds {count} constants")]
    IndexOutOfRange { index: usize, count: usize },
    #[error("constant {index} holds a {expected} but was accessed as {found}")]
    KindMismatch {
        index: usize,
        expected: ScalarKind,
        found: ScalarKind,
    },
}

pub type Result<T, E = SpecializationError> = std::result::Result<T, E>;
