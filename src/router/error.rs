use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CompileError {
    #[error("template can not be empty")]
    EmptyTemplate,

    #[error("template can not contain an empty segment")]
    EmptySegment,

    #[error("unbalanced or nested braces in segment {segment:?}")]
    MalformedBraces { segment: String },

    #[error("a segment can hold at most one parameter: {segment:?}")]
    MultipleParameters { segment: String },

    #[error("invalid parameter name {name:?}")]
    InvalidName { name: String },

    #[error("parameter {name:?} appears more than once")]
    DuplicateParameter { name: String },

    #[error("catch-all parameter {name:?} can only appear at end")]
    CatchAllNotLast { name: String },

    #[error("catch-all parameter {name:?} must occupy a whole segment")]
    CatchAllInComplexSegment { name: String },

    #[error("catch-all parameter {name:?} can not carry an inline default")]
    CatchAllDefault { name: String },

    #[error("parameter {name:?} in a segment with literal text can not have a default")]
    DefaultInComplexSegment { name: String },

    #[error("parameter {name:?} has both an inline and an explicit default")]
    ConflictingDefault { name: String },

    #[error("invalid constraint for {name:?}: {reason}")]
    InvalidConstraint { name: String, reason: String },
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum GenerateError {
    #[error("no route definition can produce a path for the given values")]
    NoDefinitionFound,

    #[error("no route named {name:?}")]
    UnknownRouteName { name: String },
}
