use thiserror::Error;

use crate::model::{ParseSectionIdError, SectionError, UnknownStackError};

#[derive(Debug, Error)]
#[non_exhaustive]
pub enum Error {
    #[error(transparent)]
    SectionId(#[from] ParseSectionIdError),
    #[error(transparent)]
    Section(#[from] SectionError),
    #[error(transparent)]
    Stack(#[from] UnknownStackError),
}
