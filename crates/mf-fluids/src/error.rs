use thiserror::Error;

pub type FluidResult<T> = Result<T, FluidError>;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FluidError {
    #[error("Unknown fluid: {name}")]
    UnknownFluid { name: String },
}
