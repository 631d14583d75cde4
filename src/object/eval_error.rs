use crate::ast;
use custom_error::custom_error;

custom_error! {
    /// Runtime errors. The display form is the user-visible message; as soon
    /// as a subexpression produces one, every enclosing construct forwards it
    /// unchanged.
    #[derive(Clone, PartialEq)]
    pub EvalError

    IdentifierNotFound{id: String} = "identifier not found: {id}",
    UnknownPrefixOperator{operator: ast::Operator, operand: &'static str} = "unknown operator: {operator}{operand}",
    UnknownInfixOperator{left: &'static str, operator: ast::Operator, right: &'static str} = "unknown operator: {left} {operator} {right}",
    TypeMismatch{left: &'static str, operator: ast::Operator, right: &'static str} = "type mismatch: {left} {operator} {right}",
    DivisionByZero = "division by zero",
    NotAFunction{type_name: &'static str} = "not a function: {type_name}",
    IncorrectArity{want: usize, got: usize} = "wrong number of arguments, want {want}, got {got}",
    LenArgCount{got: usize} = "len: incorrect argument count; want 1, got {got}",
    UnsupportedArgType{fn_name: &'static str, type_name: &'static str} = "argument to `{fn_name}` not supported, got {type_name}",
    WrongArgType{fn_name: &'static str, want: &'static str, got: &'static str} = "argument to `{fn_name}` must be {want}, got {got}",
    NotIndexable{type_name: &'static str} = "index operator not supported: {type_name}",
    NotHashable{type_name: &'static str} = "unusable as hash key: {type_name}",
}
