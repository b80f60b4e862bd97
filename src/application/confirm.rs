/// Two-step guard in front of a destructive action.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ConfirmationGate {
    #[default]
    Closed,
    Open,
}

impl ConfirmationGate {
    pub fn open(&mut self) {
        *self = ConfirmationGate::Open;
    }

    pub fn cancel(&mut self) {
        *self = ConfirmationGate::Closed;
    }

    /// Closes the gate. Returns `true` when it was open, i.e. the guarded
    /// action may run.
    pub fn confirm(&mut self) -> bool {
        let was_open = self.is_open();
        *self = ConfirmationGate::Closed;
        was_open
    }

    pub fn is_open(self) -> bool {
        matches!(self, ConfirmationGate::Open)
    }
}
