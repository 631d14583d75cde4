use crate::ast::{self, Node, Operator};
use crate::builtins;
use crate::environment::{Env, Environment};
use crate::object::{EvalError, HashKey, HashPair, HashValue, MethodObject, Object, Result};
use std::rc::Rc;

pub fn eval(node: Node, env: &Env) -> Result<Object> {
    match node {
        Node::Program(prog) => eval_program(prog, env),
        Node::Statement(s) => match s {
            ast::Statement::Expr(stmt) => eval(stmt.expression.into(), env),
            ast::Statement::Block(stmt) => eval_block_statement(stmt, env),
            ast::Statement::Return(stmt) => Ok(Object::ReturnValue(Box::new(eval(
                stmt.value.into(),
                env,
            )?))),
            ast::Statement::Value(stmt) => {
                let val = eval(stmt.value.into(), env)?;
                env.borrow_mut().set(&stmt.name.value, val);

                Ok(Object::Null)
            }
            ast::Statement::Declaration(stmt) => eval_declaration(stmt.declaration, env),
        },
        Node::Expression(e) => match e {
            ast::Expression::IntLiteral(l) => Ok(l.value.into()),
            ast::Expression::Boolean(b) => Ok(b.value.into()),
            ast::Expression::StringLiteral(s) => Ok(Object::String(s.value)),
            ast::Expression::Prefix(prefix) => {
                let right = eval((*prefix.right).into(), env)?;
                eval_prefix_expression(prefix.operator, right)
            }
            ast::Expression::Infix(infix) => {
                let left = eval((*infix.left).into(), env)?;
                let right = eval((*infix.right).into(), env)?;
                eval_infix_expression(infix.operator, left, right)
            }
            ast::Expression::If(if_expression) => eval_if_expression(if_expression, env),
            ast::Expression::Identifier(identifier) => {
                let value = env.borrow().get(&identifier.value);
                value
                    .or_else(|| {
                        builtins::BUILTINS
                            .with(|b| b.borrow().get(identifier.value.as_str()).cloned())
                    })
                    .ok_or_else(|| EvalError::IdentifierNotFound {
                        id: identifier.value,
                    })
            }
            ast::Expression::Function(fn_literal) => Ok(Object::Method(MethodObject {
                parameters: fn_literal.parameters,
                body: fn_literal.body,
                env: Rc::clone(env),
            })),
            ast::Expression::Call(call) => {
                let method = eval((*call.function).into(), env)?;
                let args = eval_expressions(call.args, env)?;
                apply_method(method, args)
            }
            ast::Expression::Array(a) => eval_expressions(a.elements, env).map(Object::Array),
            ast::Expression::HashMap(h) => eval_hash_literal(h.pairs, env),
            ast::Expression::Index(i) => {
                let left = eval((*i.left).into(), env)?;
                let index = eval((*i.index).into(), env)?;
                eval_index_expression(left, index)
            }
        },
    }
}

fn eval_program(program: ast::Program, env: &Env) -> Result<Object> {
    let mut result = Object::default();

    for stmt in program.statements.into_iter() {
        result = eval(stmt.into(), env)?;

        if let Object::ReturnValue(obj) = result {
            return Ok(*obj);
        }
    }

    Ok(result)
}

fn eval_block_statement(block: ast::BlockStatement, env: &Env) -> Result<Object> {
    let mut result = Object::default();

    for stmt in block.statements.into_iter() {
        result = eval(stmt.into(), env)?;

        if result.is_return_value() {
            return Ok(result);
        }
    }

    Ok(result)
}

fn eval_declaration(declaration: ast::Declaration, env: &Env) -> Result<Object> {
    match declaration {
        ast::Declaration::Method(decl) => {
            let method = Object::Method(MethodObject {
                parameters: decl.parameters,
                body: decl.body,
                env: Rc::clone(env),
            });
            env.borrow_mut().set(&decl.name.value, method);

            Ok(Object::Null)
        }
        // Reserved keywords parse but carry no behavior yet.
        ast::Declaration::Reserved(_) => Ok(Object::Null),
    }
}

fn eval_expressions(exprs: Vec<ast::Expression>, env: &Env) -> Result<Vec<Object>> {
    let mut result = vec![];

    for expr in exprs.into_iter() {
        result.push(eval(expr.into(), env)?)
    }
    Ok(result)
}

fn eval_prefix_expression(operator: Operator, right: Object) -> Result<Object> {
    match operator {
        Operator::Not => Ok((!right.truth_value()).into()),
        Operator::Minus => eval_prefix_minus_operator(right),
        _ => Err(EvalError::UnknownPrefixOperator {
            operator,
            operand: right.type_name(),
        }),
    }
}

fn eval_prefix_minus_operator(right: Object) -> Result<Object> {
    match right {
        Object::Integer(n) => Ok((-n).into()),
        a => Err(EvalError::UnknownPrefixOperator {
            operator: Operator::Minus,
            operand: a.type_name(),
        }),
    }
}

fn eval_infix_expression(operator: Operator, left: Object, right: Object) -> Result<Object> {
    match (left, right) {
        (Object::Integer(x), Object::Integer(y)) => {
            eval_integer_infix_expression(operator, x, y)
        }
        (Object::String(a), Object::String(b)) => eval_string_infix_expression(operator, a, b),
        (a, b) if a.type_name() != b.type_name() => Err(EvalError::TypeMismatch {
            left: a.type_name(),
            operator,
            right: b.type_name(),
        }),
        (a, b) => match operator {
            Operator::Equal => Ok((a == b).into()),
            Operator::NotEqual => Ok((a != b).into()),
            op => Err(EvalError::UnknownInfixOperator {
                left: a.type_name(),
                operator: op,
                right: b.type_name(),
            }),
        },
    }
}

fn eval_integer_infix_expression(operator: Operator, left: i64, right: i64) -> Result<Object> {
    match operator {
        Operator::Plus => Ok((left + right).into()),
        Operator::Minus => Ok((left - right).into()),
        Operator::Multiply => Ok((left * right).into()),
        Operator::Divide => {
            if right == 0 {
                Err(EvalError::DivisionByZero)
            } else {
                Ok((left / right).into())
            }
        }
        Operator::LessThan => Ok((left < right).into()),
        Operator::MoreThan => Ok((left > right).into()),
        Operator::LessOrEqual => Ok((left <= right).into()),
        Operator::MoreOrEqual => Ok((left >= right).into()),
        Operator::Equal => Ok((left == right).into()),
        Operator::NotEqual => Ok((left != right).into()),
        op => Err(EvalError::UnknownInfixOperator {
            left: "INTEGER",
            operator: op,
            right: "INTEGER",
        }),
    }
}

fn eval_string_infix_expression(operator: Operator, left: String, right: String) -> Result<Object> {
    match operator {
        Operator::Plus => Ok(Object::String(left + &right)),
        op => Err(EvalError::UnknownInfixOperator {
            left: "STRING",
            operator: op,
            right: "STRING",
        }),
    }
}

fn eval_if_expression(if_expression: ast::IfExpression, env: &Env) -> Result<Object> {
    let condition = eval((*if_expression.condition).into(), env)?;

    if condition.truth_value() {
        eval(ast::Statement::Block(if_expression.consequence).into(), env)
    } else if let Some(alt) = if_expression.alternative {
        eval(ast::Statement::Block(alt).into(), env)
    } else {
        Ok(Object::Null)
    }
}

fn apply_method(method: Object, args: Vec<Object>) -> Result<Object> {
    match method {
        Object::Method(method) => {
            if args.len() != method.parameters.len() {
                return Err(EvalError::IncorrectArity {
                    want: method.parameters.len(),
                    got: args.len(),
                });
            }

            let env = extend_method_env(&method, args);

            eval(ast::Statement::Block(method.body).into(), &env).map(Object::unwrap_return)
        }
        Object::Builtin(f) => f(args),
        obj => Err(EvalError::NotAFunction {
            type_name: obj.type_name(),
        }),
    }
}

fn extend_method_env(method: &MethodObject, args: Vec<Object>) -> Env {
    let env = Environment::with_enclosed(&method.env);

    for (param, arg) in method.parameters.iter().zip(args.into_iter()) {
        env.borrow_mut().set(&param.value, arg);
    }

    env
}

fn eval_index_expression(left: Object, index: Object) -> Result<Object> {
    match (left, index) {
        (Object::Array(arr), Object::Integer(n)) => eval_array_index_expression(arr, n),
        (Object::Hash(h), index) => eval_hash_index_expression(h, index),
        (a, _) => Err(EvalError::NotIndexable {
            type_name: a.type_name(),
        }),
    }
}

fn eval_array_index_expression(array: Vec<Object>, index: i64) -> Result<Object> {
    if index >= 0 && index < array.len() as i64 {
        Ok(array.into_iter().nth(index as usize).unwrap_or_default())
    } else {
        Ok(Object::Null)
    }
}

fn eval_hash_index_expression(hash: HashValue, index: Object) -> Result<Object> {
    Ok(hash.lookup(&HashKey::from_object(&index)?))
}

fn eval_hash_literal(
    pairs: Vec<(ast::Expression, ast::Expression)>,
    env: &Env,
) -> Result<Object> {
    let mut hash = HashValue::default();

    for (key_expr, val_expr) in pairs.into_iter() {
        let key = eval(key_expr.into(), env)?;
        let hash_key = HashKey::from_object(&key)?;
        let value = eval(val_expr.into(), env)?;

        hash.pairs.insert(hash_key, HashPair { key, value });
    }

    Ok(Object::Hash(hash))
}
