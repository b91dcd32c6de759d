use ffg_types::ValidatorId;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum SessionError {
    #[error("validator {0} is already registered")]
    DuplicateValidatorId(ValidatorId),

    #[error("voting session has already completed")]
    SessionAlreadyCompleted,

    #[error("validator {validator} has non-positive deposit weight {weight}")]
    InvalidWeight { validator: ValidatorId, weight: i128 },

    #[error("voting session has no validators")]
    NoValidators,
}
