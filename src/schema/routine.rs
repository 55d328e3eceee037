//! Scalar functions and stored procedures.

use serde::{Deserialize, Serialize};

/// One routine parameter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Parameter {
    /// Parameter name (may be empty for positional parameters).
    pub name: String,
    /// Declared native type string.
    pub native_type: String,
    /// 1-based position in the parameter list.
    pub ordinal: u32,
    /// OUT or INOUT parameter.
    pub is_output: bool,
    /// Whether the parameter carries a default value.
    pub has_default: bool,
}

/// A user-defined scalar function.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScalarFunction {
    /// Function name.
    pub name: String,
    /// Owning schema, when the engine has schemas.
    pub schema: Option<String>,
    /// Parameters in ordinal order.
    pub parameters: Vec<Parameter>,
    /// Declared return type string, when known.
    pub return_type: String,
}

/// What a stored procedure produces.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ProcedureOutput {
    /// No output beyond side effects.
    #[default]
    None,
    /// A scalar result (return value or output parameters).
    Scalar,
    /// A tabular result set with the given columns, in result order.
    Tabular(Vec<ResultColumn>),
}

/// One column of a procedure's tabular result set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResultColumn {
    /// Column name.
    pub name: String,
    /// Declared native type string.
    pub native_type: String,
}

/// A stored procedure.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoredProcedure {
    /// Procedure name.
    pub name: String,
    /// Owning schema, when the engine has schemas.
    pub schema: Option<String>,
    /// Parameters in ordinal order.
    pub parameters: Vec<Parameter>,
    /// Output classification.
    pub output: ProcedureOutput,
}
