/// Successful mutation: the affected value plus a message for the user
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Outcome<T = ()> {
    pub value: T,
    pub message: String,
}

impl<T> Outcome<T> {
    pub fn new(value: T, message: impl Into<String>) -> Self {
        Self {
            value,
            message: message.into(),
        }
    }
}

impl Outcome<()> {
    pub fn message(message: impl Into<String>) -> Self {
        Self::new((), message)
    }
}
