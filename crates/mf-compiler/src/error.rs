//! Compile-time errors. All are raised before any solver invocation.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CompileError {
    #[error("node `{node}` has kind `{kind}`, which has no registered rule set")]
    UnsupportedNodeKind { node: String, kind: String },

    #[error("channel `{channel}` has shape `{shape}`, which has no registered rule set")]
    UnsupportedChannelShape { channel: String, shape: String },

    #[error("t-junction `{node}` is malformed: {reason}")]
    MalformedJunction { node: String, reason: &'static str },

    #[error("constraint references `{entity}` {attr}, which no rule registered")]
    UnregisteredQuantity { entity: String, attr: &'static str },

    #[error("schematic has no input port")]
    NoInputPort,

    #[error("schematic has no output port")]
    NoOutputPort,

    #[error("port `{port}` has no attached channel")]
    DisconnectedPort { port: String },
}

pub type CompileResult<T> = Result<T, CompileError>;
