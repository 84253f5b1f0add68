//! Name mangling for registry keys.
//!
//! A mangled name encodes a base name and, optionally, its arity:
//!
//! ```text
//! _SR<len><name>            variadic
//! _SR<len><name>_<arity>    fixed arity
//! ```
//!
//! `<len>` is the byte length of `<name>`, which lets names contain
//! underscores and digits without ambiguity. Two functions may share a base
//! name as long as their arities differ.

use std::fmt;

use scenescript_core::MangleError;

/// Prefix shared by every mangled name.
pub const MANGLE_PREFIX: &str = "_SR";

/// Mangle a variadic function name.
///
/// ```
/// use scenescript_registry::mangle;
///
/// assert_eq!(mangle("println").unwrap(), "_SR7println");
/// assert!(mangle("").is_err());
/// ```
pub fn mangle(name: &str) -> Result<String, MangleError> {
    validate(name)?;
    Ok(format!("{MANGLE_PREFIX}{}{name}", name.len()))
}

/// Mangle a fixed-arity function name.
///
/// ```
/// use scenescript_registry::mangle_with_arity;
///
/// assert_eq!(mangle_with_arity("Color_red", 1).unwrap(), "_SR9Color_red_1");
/// ```
pub fn mangle_with_arity(name: &str, arity: usize) -> Result<String, MangleError> {
    validate(name)?;
    Ok(format!("{MANGLE_PREFIX}{}{name}_{arity}", name.len()))
}

fn validate(name: &str) -> Result<(), MangleError> {
    match name.chars().next() {
        None => Err(MangleError::EmptyName),
        Some(c) if c.is_ascii_digit() => Err(MangleError::LeadingDigit {
            name: name.to_string(),
        }),
        Some(_) => Ok(()),
    }
}

/// A demangled name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Demangled {
    /// The base name.
    pub name: String,
    /// The arity, or `None` for a variadic name.
    pub arity: Option<usize>,
}

impl Demangled {
    pub fn is_variadic(&self) -> bool {
        self.arity.is_none()
    }
}

impl fmt::Display for Demangled {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.arity {
            Some(arity) => write!(f, "{}/{}", self.name, arity),
            None => write!(f, "{}/...", self.name),
        }
    }
}

/// Invert [`mangle`] and [`mangle_with_arity`].
///
/// Every error carries the offending input.
pub fn demangle(input: &str) -> Result<Demangled, MangleError> {
    let rest = input
        .strip_prefix(MANGLE_PREFIX)
        .ok_or_else(|| MangleError::InvalidPrefix {
            input: input.to_string(),
        })?;

    let digits = rest.bytes().take_while(u8::is_ascii_digit).count();
    let length: usize = rest[..digits]
        .parse()
        .map_err(|_| MangleError::InvalidLength {
            input: input.to_string(),
        })?;
    if length == 0 {
        return Err(MangleError::InvalidLength {
            input: input.to_string(),
        });
    }

    let rest = &rest[digits..];
    let name = rest.get(..length).ok_or_else(|| MangleError::LengthMismatch {
        input: input.to_string(),
        expected: length,
        available: rest.len(),
    })?;

    let arity = match &rest[length..] {
        "" => None,
        "_" => {
            return Err(MangleError::TruncatedTrailer {
                input: input.to_string(),
            });
        }
        trailer => {
            let parsed = trailer
                .strip_prefix('_')
                .filter(|digits| digits.bytes().all(|b| b.is_ascii_digit()))
                .and_then(|digits| digits.parse().ok());
            match parsed {
                Some(arity) => Some(arity),
                None => {
                    return Err(MangleError::InvalidTrailer {
                        input: input.to_string(),
                    });
                }
            }
        }
    };

    Ok(Demangled {
        name: name.to_string(),
        arity,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn mangle_formats() {
        assert_eq!(mangle("print").unwrap(), "_SR5print");
        assert_eq!(mangle_with_arity("max", 2).unwrap(), "_SR3max_2");
        assert_eq!(
            mangle_with_arity("Color_constructor", 3).unwrap(),
            "_SR17Color_constructor_3"
        );
    }

    #[test]
    fn mangle_rejects_bad_names() {
        assert_eq!(mangle(""), Err(MangleError::EmptyName));
        assert_eq!(mangle_with_arity("", 1), Err(MangleError::EmptyName));
        assert!(matches!(
            mangle("3d"),
            Err(MangleError::LeadingDigit { name }) if name == "3d"
        ));
    }

    #[test]
    fn demangle_fixed_and_variadic() {
        assert_eq!(
            demangle("_SR9Color_red_1").unwrap(),
            Demangled {
                name: "Color_red".to_string(),
                arity: Some(1),
            }
        );
        let variadic = demangle("_SR7println").unwrap();
        assert!(variadic.is_variadic());
        assert_eq!(variadic.to_string(), "println/...");
        assert_eq!(demangle("_SR3max_2").unwrap().to_string(), "max/2");
    }

    #[test]
    fn demangle_names_containing_digits_and_underscores() {
        let mangled = mangle_with_arity("vec_3_x", 12).unwrap();
        assert_eq!(mangled, "_SR7vec_3_x_12");
        let demangled = demangle(&mangled).unwrap();
        assert_eq!(demangled.name, "vec_3_x");
        assert_eq!(demangled.arity, Some(12));
    }

    #[test]
    fn demangle_errors_identify_the_input() {
        assert!(matches!(
            demangle("SR5print"),
            Err(MangleError::InvalidPrefix { input }) if input == "SR5print"
        ));
        assert!(matches!(
            demangle("_SRxprint"),
            Err(MangleError::InvalidLength { input }) if input == "_SRxprint"
        ));
        assert!(matches!(demangle("_SR"), Err(MangleError::InvalidLength { .. })));
        assert!(matches!(demangle("_SR0_1"), Err(MangleError::InvalidLength { .. })));
        assert_eq!(
            demangle("_SR9print"),
            Err(MangleError::LengthMismatch {
                input: "_SR9print".to_string(),
                expected: 9,
                available: 5,
            })
        );
        assert!(matches!(
            demangle("_SR5print_"),
            Err(MangleError::TruncatedTrailer { input }) if input == "_SR5print_"
        ));
        assert!(matches!(demangle("_SR5printx"), Err(MangleError::InvalidTrailer { .. })));
        assert!(matches!(demangle("_SR5print_1a"), Err(MangleError::InvalidTrailer { .. })));
        assert!(matches!(demangle("_SR5print_+1"), Err(MangleError::InvalidTrailer { .. })));
    }

    #[test]
    fn error_messages_name_the_input() {
        let error = demangle("_SR9print").unwrap_err();
        assert_eq!(
            error.to_string(),
            "'_SR9print' is not a mangled name: length 9 exceeds the 5 remaining characters"
        );
    }

    proptest! {
        #[test]
        fn round_trip_with_arity(name in "[A-Za-z_][A-Za-z0-9_]{0,24}", arity in 0usize..64) {
            let demangled = demangle(&mangle_with_arity(&name, arity).unwrap()).unwrap();
            prop_assert_eq!(demangled.name, name);
            prop_assert_eq!(demangled.arity, Some(arity));
        }

        #[test]
        fn round_trip_variadic(name in "[A-Za-z_][A-Za-z0-9_]{0,24}") {
            let demangled = demangle(&mangle(&name).unwrap()).unwrap();
            prop_assert_eq!(demangled.name, name);
            prop_assert_eq!(demangled.arity, None);
        }

        #[test]
        fn unprefixed_input_is_rejected(input in "[a-z0-9_]{0,16}") {
            prop_assume!(!input.starts_with(MANGLE_PREFIX));
            let is_prefix_error = matches!(demangle(&input), Err(MangleError::InvalidPrefix { .. }));
            prop_assert!(is_prefix_error);
        }
    }
}
