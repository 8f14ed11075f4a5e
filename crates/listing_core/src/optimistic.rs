/// Two-phase value for optimistic updates: rendering prefers the provisional
/// value while a write is outstanding and falls back to the confirmed one when
/// the write fails.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Provisional<T> {
    confirmed: T,
    provisional: Option<T>,
}

impl<T> Provisional<T> {
    pub fn new(confirmed: T) -> Self {
        Self {
            confirmed,
            provisional: None,
        }
    }

    pub fn current(&self) -> &T {
        self.provisional.as_ref().unwrap_or(&self.confirmed)
    }

    pub fn confirmed(&self) -> &T {
        &self.confirmed
    }

    pub fn is_pending(&self) -> bool {
        self.provisional.is_some()
    }

    /// Shows `value` immediately; replaces any earlier provisional value.
    pub fn propose(&mut self, value: T) {
        self.provisional = Some(value);
    }

    /// The write succeeded with `value` as the authoritative result.
    pub fn confirm(&mut self, value: T) {
        self.confirmed = value;
        self.provisional = None;
    }

    /// The write failed; drops the provisional value and returns it.
    pub fn revert(&mut self) -> Option<T> {
        self.provisional.take()
    }
}
