/// Distinguishes "the user asked us to stop" from real failures.
pub trait IsCancelled {
    fn is_cancelled(&self) -> bool;
}

pub trait IsErrorCancelled {
    fn is_error_cancelled(&self) -> bool;
}

impl<T, E> IsErrorCancelled for Result<T, E>
where
    E: IsCancelled,
{
    fn is_error_cancelled(&self) -> bool {
        self.as_ref().err().is_some_and(|e| e.is_cancelled())
    }
}

impl IsCancelled for tokio::task::JoinError {
    fn is_cancelled(&self) -> bool {
        tokio::task::JoinError::is_cancelled(self)
    }
}
