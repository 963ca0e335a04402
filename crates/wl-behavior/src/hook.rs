//! The tri-state hook result.

/// Answer from a species hook.
///
/// `Handled(value)` means the species fully owns the phase (including its
/// own error handling) and the base logic is skipped; `value` is the
/// phase's output.  `Continue` runs the base logic.
#[derive(Copy, Clone, PartialEq, Eq, Debug, Default)]
pub enum Hook<T> {
    Handled(T),
    #[default]
    Continue,
}

impl<T> Hook<T> {
    #[inline]
    pub fn is_handled(&self) -> bool {
        matches!(self, Hook::Handled(_))
    }

    /// The handled value, if any.
    #[inline]
    pub fn handled(self) -> Option<T> {
        match self {
            Hook::Handled(v) => Some(v),
            Hook::Continue   => None,
        }
    }

    /// The handled value, or the result of running `base`.
    #[inline]
    pub fn or_else(self, base: impl FnOnce() -> T) -> T {
        match self {
            Hook::Handled(v) => v,
            Hook::Continue   => base(),
        }
    }

    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Hook<U> {
        match self {
            Hook::Handled(v) => Hook::Handled(f(v)),
            Hook::Continue   => Hook::Continue,
        }
    }
}
