use crate::any::TypeInfo;

#[derive(thiserror::Error, Debug)]
pub enum InjectErrorKind {
    #[error("Instance being wired is not of type {}", expected.name)]
    IncorrectOwner { expected: TypeInfo },
    #[error("Resolved dependency {} cannot fill a slot of type {}", actual.name, expected.name)]
    IncorrectSlot { expected: TypeInfo, actual: TypeInfo },
}
