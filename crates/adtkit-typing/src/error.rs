use adtkit_runtime::Symbol;
use derive_more::{Display, Error};

use crate::constructor::Arity;

pub type TypingResult<T> = Result<T, TypingError>;

#[derive(Display, Debug, Error)]
#[display("{kind}")]
pub struct TypingError {
    kind: Box<TypingErrorKind>,
}

impl From<TypingErrorKind> for TypingError {
    fn from(kind: TypingErrorKind) -> Self {
        TypingError {
            kind: Box::new(kind),
        }
    }
}

impl TypingError {
    pub fn kind(&self) -> &TypingErrorKind {
        &self.kind
    }

    pub fn is_arity(&self) -> bool {
        matches!(*self.kind, TypingErrorKind::Arity { .. })
    }
}

#[derive(Display, Debug, Error)]
pub enum TypingErrorKind {
    #[display("{constructor} takes {expected} type argument(s) but {got} were given")]
    Arity {
        constructor: Symbol,
        expected: Arity,
        got: usize,
    },
}
