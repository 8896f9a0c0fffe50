use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CodecError {
    #[error("\"{0}\" is not a registered label component")]
    UnknownComponent(String),

    #[error("label component \"{0}\" is already registered")]
    DuplicateComponent(String),

    #[error("missing argument \"{argument}\" for component \"{component}\"")]
    MissingArgument {
        component: String,
        argument: String,
    },

    #[error("invalid argument \"{argument}\" for component \"{component}\": {reason}")]
    InvalidArgument {
        component: String,
        argument: String,
        reason: String,
    },

    #[error("expected label \"{expected}\", got \"{found}\"")]
    LabelMismatch { expected: String, found: String },

    #[error("component \"{component}\" produced an invalid label \"{label}\": {reason}")]
    InvalidLabel {
        component: String,
        label: String,
        reason: String,
    },

    #[error("component \"{component}\" cannot decode \"{label}\": {reason}")]
    Decode {
        component: String,
        label: String,
        reason: String,
    },
}

impl CodecError {
    pub(crate) fn decode(component: &str, label: &str, reason: impl ToString) -> Self {
        Self::Decode {
            component: component.to_string(),
            label: label.to_string(),
            reason: reason.to_string(),
        }
    }

    pub(crate) fn invalid_argument(component: &str, argument: &str, reason: impl ToString) -> Self {
        Self::InvalidArgument {
            component: component.to_string(),
            argument: argument.to_string(),
            reason: reason.to_string(),
        }
    }
}
