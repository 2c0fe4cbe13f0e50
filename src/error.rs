//! Construction-time failures. Everything that happens once `Vm::run`
//! starts is a warning, never a `Result::Err`; `VmError` only ever
//! surfaces before the first instruction is fetched.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum VmError {
    #[error("could not open binary file {path}: {source}")]
    BinaryOpen {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("binary file length {0} is not a multiple of 4")]
    MisalignedBinaryLength(u64),
    #[error("register count must be between 1 and 32, got {0}")]
    InvalidRegisterCount(usize),
}
