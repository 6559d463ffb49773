use thiserror::Error;

/// A rival tick that could not produce a valid rival.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum RivalError {
    #[error("rival {rival} has non-finite fields before its tick")]
    CorruptInput { rival: String },

    #[error("rival {rival} produced non-finite fields after {action}")]
    NonFinite { rival: String, action: &'static str },
}
