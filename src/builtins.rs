use crate::object::{EvalError, Object, Result};
use std::cell::RefCell;
use std::collections::HashMap;

pub type Builtin = fn(Vec<Object>) -> Result<Object>;

fn len(args: Vec<Object>) -> Result<Object> {
    if args.len() != 1 {
        return Err(EvalError::LenArgCount { got: args.len() });
    }

    match args.into_iter().next().unwrap() {
        Object::Array(a) => Ok(Object::Integer(a.len() as i64)),
        Object::String(s) => Ok(Object::Integer(s.len() as i64)),
        obj => Err(EvalError::UnsupportedArgType {
            fn_name: "len",
            type_name: obj.type_name(),
        }),
    }
}

fn first(args: Vec<Object>) -> Result<Object> {
    if args.len() != 1 {
        return Err(EvalError::IncorrectArity {
            want: 1,
            got: args.len(),
        });
    }

    match args.into_iter().next().unwrap() {
        Object::Array(a) => Ok(a.into_iter().next().unwrap_or_default()),
        obj => Err(EvalError::WrongArgType {
            fn_name: "first",
            want: "ARRAY",
            got: obj.type_name(),
        }),
    }
}

fn tail(args: Vec<Object>) -> Result<Object> {
    if args.len() != 1 {
        return Err(EvalError::IncorrectArity {
            want: 1,
            got: args.len(),
        });
    }

    match args.into_iter().next().unwrap() {
        Object::Array(a) => {
            if a.is_empty() {
                Ok(Object::Null)
            } else {
                Ok(Object::Array(a.into_iter().skip(1).collect()))
            }
        }
        obj => Err(EvalError::WrongArgType {
            fn_name: "tail",
            want: "ARRAY",
            got: obj.type_name(),
        }),
    }
}

fn append(args: Vec<Object>) -> Result<Object> {
    if args.len() != 2 {
        return Err(EvalError::IncorrectArity {
            want: 2,
            got: args.len(),
        });
    }

    let mut args_iter = args.into_iter();
    match args_iter.next().unwrap() {
        Object::Array(a) => {
            let mut result = a;
            result.push(args_iter.next().unwrap());
            Ok(Object::Array(result))
        }
        obj => Err(EvalError::WrongArgType {
            fn_name: "append",
            want: "ARRAY",
            got: obj.type_name(),
        }),
    }
}

fn puts(args: Vec<Object>) -> Result<Object> {
    for arg in args.iter() {
        println!("{}", arg);
    }
    Ok(Object::Null)
}

fn print(args: Vec<Object>) -> Result<Object> {
    let mut out = Vec::with_capacity(args.len());
    for arg in args.into_iter() {
        match arg {
            Object::String(s) => out.push(s),
            obj => {
                return Err(EvalError::UnsupportedArgType {
                    fn_name: "print",
                    type_name: obj.type_name(),
                })
            }
        }
    }
    print!("{}", out.join(""));
    Ok(Object::Null)
}

thread_local! {
    pub static BUILTINS: RefCell<HashMap<&'static str, Object>> = RefCell::new(
        vec![
            ("len", Object::Builtin(len as Builtin)),
            ("first", Object::Builtin(first as Builtin)),
            ("tail", Object::Builtin(tail as Builtin)),
            ("append", Object::Builtin(append as Builtin)),
            ("puts", Object::Builtin(puts as Builtin)),
            ("print", Object::Builtin(print as Builtin)),
        ]
        .into_iter()
        .collect(),
    );
}
