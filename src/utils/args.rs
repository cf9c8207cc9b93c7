//! Argument normalization utilities.
//!
//! Transforms CLI arguments before clap parsing so that wrapper scripts can
//! pass extra flags without the tool rejecting them.

/// Drop option-like arguments that are not in `known_flags`.
///
/// The first element (the binary name) is always kept. Anything after a bare
/// `--` passes through unchanged. `--flag=value` is matched on its `--flag`
/// part. A lone `-` is treated as a positional value. An unknown option
/// without an inline value also takes the next argument with it when that
/// argument does not start with `-`, so `--template foo my-app` keeps only
/// `my-app`.
pub fn strip_unknown_options(args: Vec<String>, known_flags: &[&str]) -> Vec<String> {
    let mut result = Vec::with_capacity(args.len());
    let mut iter = args.into_iter().peekable();

    if let Some(bin) = iter.next() {
        result.push(bin);
    }

    let mut passthrough = false;
    while let Some(arg) = iter.next() {
        if passthrough {
            result.push(arg);
            continue;
        }

        if arg == "--" {
            passthrough = true;
            result.push(arg);
            continue;
        }

        if !arg.starts_with('-') || arg == "-" {
            result.push(arg);
            continue;
        }

        let flag = arg.split('=').next().unwrap_or(&arg);
        if known_flags.contains(&flag) {
            result.push(arg);
            continue;
        }

        let has_inline_value = arg.contains('=');
        if !has_inline_value && iter.peek().is_some_and(|next| !next.starts_with('-')) {
            iter.next();
        }
    }

    result
}
