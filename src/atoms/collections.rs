//! # Collection Operations
//!
//! `cons`, `car` and `cdr` over persistent list values.
//!
//! `cons` onto a list prepends. `cons` onto anything else builds the
//! two-element list `(first second)`; there are no dotted pairs.

use crate::atoms::helpers::extract_list;
use crate::errors::EvalError;
use crate::runtime::{PrimitiveFn, Value};

/// Prepends a value to a list.
///
/// Usage: (cons <value> <list-or-atom>)
///
/// Example:
///   (cons 1 '(2 3)) ; => (1 2 3)
///   (cons 1 2)      ; => (1 2)
pub const ATOM_CONS: PrimitiveFn = |args| {
    let first = args[0].clone();
    match &args[1] {
        Value::List(rest) => {
            let mut items = rest.clone();
            items.push_front(first);
            Ok(Value::List(items))
        }
        atom => Ok(Value::list([first, atom.clone()])),
    }
};

/// First element of a non-empty list.
///
/// Usage: (car <list>)
pub const ATOM_CAR: PrimitiveFn = |args| {
    let items = extract_list(args, "car")?;
    items.front().cloned().ok_or_else(|| EvalError::EmptyListAccess {
        operator: "car".to_string(),
    })
};

/// Everything but the first element of a non-empty list. Always a list, even
/// when one element remains.
///
/// Usage: (cdr <list>)
pub const ATOM_CDR: PrimitiveFn = |args| {
    let mut items = extract_list(args, "cdr")?;
    if items.pop_front().is_none() {
        return Err(EvalError::EmptyListAccess {
            operator: "cdr".to_string(),
        });
    }
    Ok(Value::List(items))
};

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::ErrorKind;

    fn sym(s: &str) -> Value {
        Value::symbol(s)
    }

    #[test]
    fn cons_prepends_onto_lists() {
        let head = Value::list([sym("hello"), Value::from(2.0)]);
        let tail = Value::list([sym("hah"), sym("no worries")]);
        assert_eq!(
            ATOM_CONS(&[head.clone(), tail.clone()]).unwrap(),
            Value::list([head, sym("hah"), sym("no worries")])
        );
        // The operand list is not touched.
        assert_eq!(tail.as_list().unwrap().len(), 2);
    }

    #[test]
    fn cons_of_two_atoms_is_a_pair_list() {
        assert_eq!(
            ATOM_CONS(&[Value::from(1.0), Value::from(2.0)]).unwrap(),
            Value::list([Value::from(1.0), Value::from(2.0)])
        );
    }

    #[test]
    fn car_and_cdr_split_a_list() {
        let list = Value::list([sym("hello"), sym("world"), sym("now")]);
        assert_eq!(ATOM_CAR(&[list.clone()]).unwrap(), sym("hello"));
        assert_eq!(
            ATOM_CDR(&[list]).unwrap(),
            Value::list([sym("world"), sym("now")])
        );
    }

    #[test]
    fn cdr_of_singleton_is_empty_list() {
        assert_eq!(
            ATOM_CDR(&[Value::list([sym("x")])]).unwrap(),
            Value::empty_list()
        );
    }

    #[test]
    fn empty_list_access_fails() {
        assert_eq!(
            ATOM_CAR(&[Value::empty_list()]).unwrap_err().kind(),
            ErrorKind::EmptyListAccess
        );
        assert_eq!(
            ATOM_CDR(&[Value::empty_list()]).unwrap_err().kind(),
            ErrorKind::EmptyListAccess
        );
    }

    #[test]
    fn car_of_atom_is_a_type_error() {
        assert_eq!(
            ATOM_CAR(&[Value::from(5.0)]).unwrap_err().kind(),
            ErrorKind::Type
        );
    }
}
