/// A value that is computed on first access and cached afterwards.
///
/// Unlike an "empty means uncomputed" convention, an empty computed value
/// stays computed.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Memo<T> {
    #[default]
    Uncomputed,
    Computed(T),
}

impl<T> Memo<T> {
    pub fn is_computed(&self) -> bool {
        matches!(self, Memo::Computed(_))
    }

    pub fn get(&self) -> Option<&T> {
        match self {
            Memo::Uncomputed => None,
            Memo::Computed(value) => Some(value),
        }
    }

    pub fn set(&mut self, value: T) {
        *self = Memo::Computed(value);
    }

    pub fn reset(&mut self) {
        *self = Memo::Uncomputed;
    }
}
