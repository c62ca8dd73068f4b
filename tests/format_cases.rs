//! Label formatting cases read from `tests/format_cases/*.txt`.
//!
//! Each non-comment line is `spec | value [unit] | expected`, with an optional
//! fourth column `wrap` for longitude-like formatting.

use coordaxes::{FormatSpec, Quantity, SexagesimalFormatter, TickFormatter, Unit};
use datatest_stable::Utf8Path;

struct Case<'a> {
    spec: &'a str,
    value: Quantity,
    expected: &'a str,
    wraps: bool,
}

fn parse_unit(name: &str) -> Result<Unit, String> {
    Ok(match name {
        "deg" => Unit::Degree,
        "hourangle" => Unit::Hour,
        "arcmin" => Unit::Arcmin,
        "arcsec" => Unit::Arcsec,
        "rad" => Unit::Radian,
        "" => Unit::Dimensionless,
        other => return Err(format!("unknown unit `{other}`")),
    })
}

fn parse_case(line: &str) -> Result<Case<'_>, String> {
    let columns: Vec<&str> = line.split('|').map(str::trim).collect();
    let (spec, quantity, expected, flag) = match columns.as_slice() {
        [spec, quantity, expected] => (*spec, *quantity, *expected, None),
        [spec, quantity, expected, flag] => (*spec, *quantity, *expected, Some(*flag)),
        _ => return Err(format!("expected 3 or 4 columns, got {}", columns.len())),
    };
    let (number, unit) = quantity.split_once(' ').unwrap_or((quantity, ""));
    let number: f64 = number.parse().map_err(|e| format!("bad value `{number}`: {e}"))?;
    let wraps = match flag {
        None => false,
        Some("wrap") => true,
        Some(other) => return Err(format!("unknown flag `{other}`")),
    };
    Ok(Case {
        spec,
        value: Quantity::new(number, parse_unit(unit.trim())?),
        expected,
        wraps,
    })
}

/// Format an inline diff showing changes with colored markers
fn format_inline_diff(expected: &str, actual: &str) -> String {
    use dissimilar::Chunk;

    let mut result = String::new();
    for chunk in dissimilar::diff(expected, actual) {
        match chunk {
            Chunk::Equal(text) => result.push_str(text),
            Chunk::Delete(text) => {
                result.push_str("\x1b[31m[-");
                result.push_str(text);
                result.push_str("-]\x1b[0m");
            }
            Chunk::Insert(text) => {
                result.push_str("\x1b[32m[+");
                result.push_str(text);
                result.push_str("+]\x1b[0m");
            }
        }
    }
    result
}

fn test_format_file(path: &Utf8Path) -> datatest_stable::Result<()> {
    let source = std::fs::read_to_string(path)?;
    let mut failures = Vec::new();
    let mut checked = 0;

    for (number, line) in source.lines().enumerate() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        let case = parse_case(line).map_err(|e| format!("{path}:{}: {e}", number + 1))?;
        let spec: FormatSpec = case.spec.parse()?;
        let formatter = SexagesimalFormatter::new(spec).wrapping(case.wraps);
        let actual = formatter.format(&case.value)?;
        checked += 1;

        if actual != case.expected {
            failures.push(format!(
                "{path}:{}: `{}` of {:?}\n  {}",
                number + 1,
                case.spec,
                case.value,
                format_inline_diff(case.expected, &actual)
            ));
        }
    }

    if checked == 0 {
        return Err(format!("{path}: no cases").into());
    }
    if failures.is_empty() {
        Ok(())
    } else {
        Err(failures.join("\n").into())
    }
}

datatest_stable::harness! {
    { test = test_format_file, root = concat!(env!("CARGO_MANIFEST_DIR"), "/tests/format_cases"), pattern = r"\.txt$" },
}
