use crate::ast;
use crate::builtins::Builtin;
use crate::environment::Env;
use std::collections::HashMap;
use std::fmt::{self, Display, Formatter};
use std::rc::Rc;

mod eval_error;
pub use eval_error::EvalError;

mod hash;
pub use hash::HashKey;

pub type Result<T> = std::result::Result<T, EvalError>;

#[derive(Debug, Clone, PartialEq)]
pub enum Object {
    Method(MethodObject),
    Builtin(Builtin),
    ReturnValue(Box<Object>),
    Integer(i64),
    Boolean(bool),
    String(String),
    Array(Vec<Object>),
    Hash(HashValue),
    Null,
}

impl Display for Object {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        match self {
            Self::Method(method) => write!(f, "{}", method),
            Self::Builtin(_) => write!(f, "builtin method"),
            Self::ReturnValue(obj) => write!(f, "{}", obj),
            Self::Integer(n) => write!(f, "{}", n),
            Self::Boolean(b) => write!(f, "{}", b),
            Self::String(s) => write!(f, "{}", s),
            Self::Array(a) => {
                let elements: Vec<String> = a.iter().map(Object::to_string).collect();
                write!(f, "[{}]", elements.join(", "))
            }
            Self::Hash(h) => write!(f, "{}", h),
            Self::Null => write!(f, "null"),
        }
    }
}

impl Default for Object {
    fn default() -> Self {
        Self::Null
    }
}

impl From<i64> for Object {
    fn from(n: i64) -> Self {
        Self::Integer(n)
    }
}

impl From<bool> for Object {
    fn from(b: bool) -> Self {
        Self::Boolean(b)
    }
}

impl From<String> for Object {
    fn from(s: String) -> Self {
        Self::String(s)
    }
}

impl From<&str> for Object {
    fn from(s: &str) -> Self {
        s.to_owned().into()
    }
}

impl From<Vec<Object>> for Object {
    fn from(a: Vec<Object>) -> Self {
        Self::Array(a)
    }
}

impl From<HashValue> for Object {
    fn from(h: HashValue) -> Self {
        Self::Hash(h)
    }
}

impl Object {
    pub fn is_return_value(&self) -> bool {
        matches!(self, Self::ReturnValue(_))
    }

    pub fn unwrap_return(self) -> Self {
        match self {
            Self::ReturnValue(o) => *o,
            obj => obj,
        }
    }

    pub fn type_name(&self) -> &'static str {
        match self {
            Self::Method(_) => "METHOD",
            Self::Builtin(_) => "BUILTIN",
            Self::ReturnValue(o) => o.type_name(),
            Self::Boolean(_) => "BOOLEAN",
            Self::Integer(_) => "INTEGER",
            Self::String(_) => "STRING",
            Self::Array(_) => "ARRAY",
            Self::Hash(_) => "HASH",
            Self::Null => "NULL",
        }
    }

    /// Only `false` and `null` are falsy.
    pub fn truth_value(&self) -> bool {
        !matches!(self, Self::Boolean(false) | Self::Null)
    }
}

/// A user-defined callable. Holds the environment it was created in, so a
/// call sees the bindings of the defining scope as they are at call time.
#[derive(Clone)]
pub struct MethodObject {
    pub parameters: Vec<ast::Identifier>,
    pub body: ast::BlockStatement,
    pub env: Env,
}

// A method bound in the environment it captured would send a derived Debug
// into that same environment forever, so the env field is left out.
impl fmt::Debug for MethodObject {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        f.debug_struct("MethodObject")
            .field("parameters", &self.parameters)
            .field("body", &self.body)
            .finish()
    }
}

// The captured environment can transitively contain this method again, so
// equality has to compare the Rc by pointer rather than by contents.
impl PartialEq for MethodObject {
    fn eq(&self, other: &Self) -> bool {
        self.parameters == other.parameters
            && self.body == other.body
            && Rc::ptr_eq(&self.env, &other.env)
    }
}

impl Display for MethodObject {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        if self.parameters.is_empty() {
            return write!(f, "meth {}", self.body);
        }

        let parameters: Vec<String> = self
            .parameters
            .iter()
            .map(ast::Identifier::to_string)
            .collect();

        write!(f, "meth: {} {}", parameters.join(", "), self.body)
    }
}

/// One entry of a hash map. The key object itself is kept next to the value
/// so the map can render with the keys it was written with, not their
/// encoded form.
#[derive(Debug, Clone, PartialEq)]
pub struct HashPair {
    pub key: Object,
    pub value: Object,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct HashValue {
    pub pairs: HashMap<HashKey, HashPair>,
}

impl HashValue {
    pub fn lookup(&self, key: &HashKey) -> Object {
        self.pairs
            .get(key)
            .map(|pair| pair.value.clone())
            .unwrap_or_default()
    }
}

impl Display for HashValue {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        let pairs: Vec<String> = self
            .pairs
            .values()
            .map(|pair| format!("{}: {}", pair.key, pair.value))
            .collect();

        write!(f, "{{{}}}", pairs.join(", "))
    }
}
