//! # Scheem Atom System
//!
//! Atoms are the primitive operations every program starts with. Each one has
//! a fixed arity and checks its operand types before computing anything.
//!
//! ## Module Structure
//!
//! - **`helpers`**: Operand extraction and type errors shared by all atoms
//! - **`math`**: Arithmetic (`+`, `-`, `*`, `/`)
//! - **`logic`**: Numeric comparison (`=`, `<`, `>`, `<=`, `>=`)
//! - **`collections`**: List construction and access (`cons`, `car`, `cdr`)
//! - **`special_forms`**: Forms with their own evaluation rules (`quote`, `if`, ...)
//!
//! Primitives are installed into the global frame by `register_all_atoms`
//! when an `Environment` is built, never lazily during evaluation.

use crate::errors::Arity;
use crate::runtime::{Environment, Primitive, Value};

pub mod helpers;

pub mod collections;
pub mod logic;
pub mod math;
pub mod special_forms;

// ============================================================================
// PRIMITIVE TABLE
// ============================================================================

const fn binary(name: &'static str, func: crate::runtime::PrimitiveFn) -> Primitive {
    Primitive {
        name,
        arity: Arity::Exactly(2),
        func,
    }
}

const fn unary(name: &'static str, func: crate::runtime::PrimitiveFn) -> Primitive {
    Primitive {
        name,
        arity: Arity::Exactly(1),
        func,
    }
}

/// Every primitive the language ships with.
pub const PRIMITIVES: &[Primitive] = &[
    binary("+", math::ATOM_ADD),
    binary("-", math::ATOM_SUB),
    binary("*", math::ATOM_MUL),
    binary("/", math::ATOM_DIV),
    binary("=", logic::ATOM_EQ),
    binary("<", logic::ATOM_LT),
    binary(">", logic::ATOM_GT),
    binary("<=", logic::ATOM_LTE),
    binary(">=", logic::ATOM_GTE),
    binary("cons", collections::ATOM_CONS),
    unary("car", collections::ATOM_CAR),
    unary("cdr", collections::ATOM_CDR),
];

/// Looks a primitive up by name without going through an environment.
pub fn find_primitive(name: &str) -> Option<&'static Primitive> {
    PRIMITIVES.iter().find(|p| p.name == name)
}

/// Binds every primitive into `env`, overwriting whatever was there.
pub fn register_all_atoms(env: &Environment) {
    for primitive in PRIMITIVES {
        env.define(primitive.name, Value::Primitive(*primitive));
    }
}
