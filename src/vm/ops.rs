//! Operator semantics.
//!
//! Arithmetic is defined on numbers, with `+` also concatenating when
//! either side is a string. Equality is defined on every pair of values;
//! values of different types are unequal. Relational operators order
//! numbers and strings and are `false` for every other pairing. The
//! logical operators require booleans.

use std::cmp::Ordering;

use scenescript_compiler::Instruction;
use scenescript_core::{RuntimeErrorKind, Variant};

type Result<T> = std::result::Result<T, RuntimeErrorKind>;

/// Apply a binary operator instruction.
pub(crate) fn binary(instruction: Instruction, left: Variant, right: Variant) -> Result<Variant> {
    match instruction {
        Instruction::Add => add(left, right),
        Instruction::Sub => numeric("-", left, right, |a, b| a - b),
        Instruction::Mul => numeric("*", left, right, |a, b| a * b),
        Instruction::Div => numeric("/", left, right, |a, b| a / b),
        Instruction::And => logical("and", left, right, |a, b| a && b),
        Instruction::Or => logical("or", left, right, |a, b| a || b),
        Instruction::Eq => Ok(Variant::Bool(left.script_eq(&right))),
        Instruction::Ne => Ok(Variant::Bool(!left.script_eq(&right))),
        Instruction::Lt => Ok(relational(&left, &right, |o| o == Ordering::Less)),
        Instruction::Gt => Ok(relational(&left, &right, |o| o == Ordering::Greater)),
        Instruction::Le => Ok(relational(&left, &right, |o| o != Ordering::Greater)),
        Instruction::Ge => Ok(relational(&left, &right, |o| o != Ordering::Less)),
        other => Err(RuntimeErrorKind::InvalidInstruction { name: other.name() }),
    }
}

/// Arithmetic negation.
pub(crate) fn negate(operand: Variant) -> Result<Variant> {
    match operand {
        Variant::Double(value) => Ok(Variant::Double(-value)),
        other => Err(RuntimeErrorKind::UnaryTypeMismatch {
            operation: "-",
            operand: other.type_name(),
        }),
    }
}

/// Logical `not`.
pub(crate) fn not(operand: Variant) -> Result<Variant> {
    match operand {
        Variant::Bool(value) => Ok(Variant::Bool(!value)),
        other => Err(RuntimeErrorKind::UnaryTypeMismatch {
            operation: "not",
            operand: other.type_name(),
        }),
    }
}

/// The boolean tested by `if` and `while`.
pub(crate) fn condition(value: Variant) -> Result<bool> {
    match value {
        Variant::Bool(value) => Ok(value),
        other => Err(RuntimeErrorKind::ConditionNotBool {
            actual: other.type_name(),
        }),
    }
}

fn add(left: Variant, right: Variant) -> Result<Variant> {
    match (left, right) {
        (Variant::Double(a), Variant::Double(b)) => Ok(Variant::Double(a + b)),
        (Variant::String(mut a), right) => {
            a.push_str(&right.to_string());
            Ok(Variant::String(a))
        }
        (left, Variant::String(b)) => Ok(Variant::String(format!("{}{}", left, b))),
        (left, right) => Err(mismatch("+", &left, &right)),
    }
}

fn numeric(operation: &'static str, left: Variant, right: Variant, op: fn(f64, f64) -> f64) -> Result<Variant> {
    match (&left, &right) {
        (Variant::Double(a), Variant::Double(b)) => Ok(Variant::Double(op(*a, *b))),
        _ => Err(mismatch(operation, &left, &right)),
    }
}

fn logical(operation: &'static str, left: Variant, right: Variant, op: fn(bool, bool) -> bool) -> Result<Variant> {
    match (&left, &right) {
        (Variant::Bool(a), Variant::Bool(b)) => Ok(Variant::Bool(op(*a, *b))),
        _ => Err(mismatch(operation, &left, &right)),
    }
}

fn relational(left: &Variant, right: &Variant, test: fn(Ordering) -> bool) -> Variant {
    Variant::Bool(left.script_cmp(right).is_some_and(test))
}

fn mismatch(operation: &'static str, left: &Variant, right: &Variant) -> RuntimeErrorKind {
    RuntimeErrorKind::TypeMismatch {
        operation,
        left: left.type_name(),
        right: right.type_name(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn num(value: f64) -> Variant {
        Variant::from(value)
    }

    #[test]
    fn non_operator_instruction_is_rejected() {
        assert_eq!(
            binary(Instruction::Pop, num(1.0), num(2.0)),
            Err(RuntimeErrorKind::InvalidInstruction { name: "POP" })
        );
    }

    #[test]
    fn arithmetic() {
        assert_eq!(binary(Instruction::Add, num(1.0), num(2.0)).unwrap(), num(3.0));
        assert_eq!(binary(Instruction::Sub, num(1.0), num(2.0)).unwrap(), num(-1.0));
        assert_eq!(binary(Instruction::Mul, num(3.0), num(2.0)).unwrap(), num(6.0));
        assert_eq!(binary(Instruction::Div, num(1.0), num(4.0)).unwrap(), num(0.25));
        assert_eq!(negate(num(2.0)).unwrap(), num(-2.0));
    }

    #[test]
    fn division_by_zero_is_infinite() {
        let result = binary(Instruction::Div, num(1.0), num(0.0)).unwrap();
        assert_eq!(result.as_double(), Some(f64::INFINITY));
    }

    #[test]
    fn concatenation() {
        assert_eq!(
            binary(Instruction::Add, Variant::from("n = "), num(3.0)).unwrap(),
            Variant::from("n = 3")
        );
        assert_eq!(
            binary(Instruction::Add, Variant::from(true), Variant::from("!")).unwrap(),
            Variant::from("true!")
        );
    }

    #[test]
    fn type_mismatches() {
        assert_eq!(
            binary(Instruction::Sub, Variant::from("a"), num(1.0)).unwrap_err(),
            RuntimeErrorKind::TypeMismatch {
                operation: "-",
                left: "string".to_string(),
                right: "number".to_string(),
            }
        );
        assert!(binary(Instruction::Add, Variant::from(true), num(1.0)).is_err());
        assert!(binary(Instruction::And, num(1.0), Variant::from(true)).is_err());
        assert!(negate(Variant::from(true)).is_err());
        assert!(not(num(0.0)).is_err());
    }

    #[test]
    fn equality_across_types() {
        let one = num(1.0);
        let text = Variant::from("1");
        assert_eq!(binary(Instruction::Eq, one.clone(), text.clone()).unwrap(), Variant::from(false));
        assert_eq!(binary(Instruction::Ne, one.clone(), text).unwrap(), Variant::from(true));
        assert_eq!(binary(Instruction::Eq, one.clone(), num(1.0)).unwrap(), Variant::from(true));
        assert_eq!(binary(Instruction::Ne, one, num(1.0)).unwrap(), Variant::from(false));
    }

    #[test]
    fn relational_operators() {
        assert_eq!(binary(Instruction::Lt, num(1.0), num(2.0)).unwrap(), Variant::from(true));
        assert_eq!(binary(Instruction::Le, num(2.0), num(2.0)).unwrap(), Variant::from(true));
        assert_eq!(binary(Instruction::Gt, num(1.0), num(2.0)).unwrap(), Variant::from(false));
        assert_eq!(
            binary(Instruction::Ge, Variant::from("b"), Variant::from("a")).unwrap(),
            Variant::from(true)
        );
        // Unordered pairs compare false in every direction.
        for op in [Instruction::Lt, Instruction::Le, Instruction::Gt, Instruction::Ge] {
            assert_eq!(binary(op, num(1.0), Variant::from("1")).unwrap(), Variant::from(false));
            assert_eq!(binary(op, num(f64::NAN), num(1.0)).unwrap(), Variant::from(false));
        }
    }

    #[test]
    fn logic() {
        let t = Variant::from(true);
        let f = Variant::from(false);
        assert_eq!(binary(Instruction::And, t.clone(), f.clone()).unwrap(), f);
        assert_eq!(binary(Instruction::Or, t.clone(), f.clone()).unwrap(), t);
        assert_eq!(not(t.clone()).unwrap(), f);
        assert!(condition(t).unwrap());
        assert_eq!(
            condition(num(1.0)).unwrap_err(),
            RuntimeErrorKind::ConditionNotBool {
                actual: "number".to_string()
            }
        );
    }
}
