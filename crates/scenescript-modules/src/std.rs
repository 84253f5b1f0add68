//! Standard output functions.
//!
//! `print(fmt, args...)` and `println(fmt, args...)` substitute each `{}`
//! in the format string with the display form of the next argument and
//! write the result to the call's output sink. `{{` and `}}` produce
//! literal braces.

use scenescript_core::{NativeError, RegistrationError, Variant};
use scenescript_registry::{CallContext, FunctionRegistry};

// =============================================================================
// FORMATTING
// =============================================================================

/// Render `template` with `args` substituted for its `{}` placeholders.
///
/// The number of placeholders must equal the number of arguments.
pub fn format(template: &str, args: &[Variant]) -> Result<String, NativeError> {
    let mut out = String::with_capacity(template.len());
    let mut remaining = args.iter();
    let mut placeholders = 0;
    let mut chars = template.chars().peekable();

    while let Some(ch) = chars.next() {
        match ch {
            '{' if chars.peek() == Some(&'{') => {
                chars.next();
                out.push('{');
            }
            '}' if chars.peek() == Some(&'}') => {
                chars.next();
                out.push('}');
            }
            '{' if chars.peek() == Some(&'}') => {
                chars.next();
                placeholders += 1;
                let Some(arg) = remaining.next() else {
                    return Err(count_mismatch(template, args.len()));
                };
                out.push_str(&arg.to_string());
            }
            '{' | '}' => {
                return Err(NativeError::Format(format!(
                    "unmatched '{}' in format string \"{}\"",
                    ch, template
                )));
            }
            _ => out.push(ch),
        }
    }

    if placeholders != args.len() {
        return Err(count_mismatch(template, args.len()));
    }
    Ok(out)
}

fn count_mismatch(template: &str, given: usize) -> NativeError {
    let expected = count_placeholders(template);
    NativeError::Format(format!(
        "format string \"{}\" has {} placeholder(s) but {} argument(s) were given",
        template, expected, given
    ))
}

fn count_placeholders(template: &str) -> usize {
    let mut count = 0;
    let mut chars = template.chars().peekable();
    while let Some(ch) = chars.next() {
        match (ch, chars.peek()) {
            ('{', Some('{')) | ('}', Some('}')) => {
                chars.next();
            }
            ('{', Some('}')) => {
                chars.next();
                count += 1;
            }
            _ => {}
        }
    }
    count
}

// =============================================================================
// OUTPUT FUNCTIONS
// =============================================================================

/// Print a formatted string without a trailing newline.
/// Usage: `print("x = {}", x)`
pub fn print(ctx: &mut CallContext<'_>) -> Result<Variant, NativeError> {
    let text = format_args_of(ctx)?;
    ctx.write_str(&text)?;
    Ok(Variant::Unset)
}

/// Print a formatted string followed by a newline.
/// Usage: `println("x = {}", x)`
pub fn println(ctx: &mut CallContext<'_>) -> Result<Variant, NativeError> {
    let text = format_args_of(ctx)?;
    ctx.write_str(&text)?;
    ctx.write_str("\n")?;
    Ok(Variant::Unset)
}

fn format_args_of(ctx: &CallContext<'_>) -> Result<String, NativeError> {
    let template: String = ctx.arg(0)?;
    format(&template, &ctx.args()[1..])
}

// =============================================================================
// INSTALLATION
// =============================================================================

/// Register `print` and `println`.
pub fn install(registry: &mut FunctionRegistry) -> Result<(), RegistrationError> {
    registry.add_variadic_function("print", print)?;
    registry.add_variadic_function("println", println)?;
    Ok(())
}
