//! Iteration name templates.
//!
//! Case names and run paths for each iteration are produced from a
//! printf-style template containing at most one integer conversion,
//! e.g. `ITERATED_ENSEMBLE_SMOOTHER%d` or `iter%03d`.

use crate::core::error::DomainError;

/// A parsed template segment.
#[derive(Debug, PartialEq)]
enum Segment<'a> {
    Literal(&'a str),
    Percent,
    Integer { zero_pad: bool, width: usize },
}

/// Render `template` for iteration `iter`.
///
/// Supports `%d` and `%i` with an optional `0` flag and width, plus `%%`.
/// A template without any conversion renders unchanged.
pub fn render_iteration(template: &str, iter: i32) -> Result<String, DomainError> {
    let segments = parse(template)?;
    let mut out = String::with_capacity(template.len() + 4);

    for segment in segments {
        match segment {
            Segment::Literal(s) => out.push_str(s),
            Segment::Percent => out.push('%'),
            Segment::Integer {
                zero_pad: true,
                width,
            } => out.push_str(&format!("{:0width$}", iter, width = width)),
            Segment::Integer {
                zero_pad: false,
                width,
            } => out.push_str(&format!("{:width$}", iter, width = width)),
        }
    }

    Ok(out)
}

/// Whether the template changes with the iteration number.
///
/// Malformed templates report `false`; use [`check_template`] to find out why.
pub fn template_has_placeholder(template: &str) -> bool {
    parse(template)
        .map(|segments| {
            segments
                .iter()
                .any(|s| matches!(s, Segment::Integer { .. }))
        })
        .unwrap_or(false)
}

/// Validate a template without rendering it.
pub fn check_template(template: &str) -> Result<(), DomainError> {
    parse(template).map(|_| ())
}

fn parse(template: &str) -> Result<Vec<Segment<'_>>, DomainError> {
    let invalid = |reason: String| DomainError::InvalidTemplate {
        template: template.to_string(),
        reason,
    };

    let bytes = template.as_bytes();
    let mut segments = Vec::new();
    let mut literal_start = 0;
    let mut conversions = 0;
    let mut i = 0;

    while i < bytes.len() {
        if bytes[i] != b'%' {
            i += 1;
            continue;
        }

        if literal_start < i {
            segments.push(Segment::Literal(&template[literal_start..i]));
        }

        let spec_start = i;
        i += 1;
        if i < bytes.len() && bytes[i] == b'%' {
            segments.push(Segment::Percent);
            i += 1;
            literal_start = i;
            continue;
        }

        let zero_pad = i < bytes.len() && bytes[i] == b'0';
        if zero_pad {
            i += 1;
        }
        let width_start = i;
        while i < bytes.len() && bytes[i].is_ascii_digit() {
            i += 1;
        }
        let width = if width_start < i {
            template[width_start..i]
                .parse::<usize>()
                .map_err(|_| invalid("field width out of range".to_string()))?
        } else {
            0
        };

        match bytes.get(i) {
            Some(b'd') | Some(b'i') => {
                conversions += 1;
                if conversions > 1 {
                    return Err(invalid(
                        "more than one integer conversion".to_string(),
                    ));
                }
                segments.push(Segment::Integer { zero_pad, width });
                i += 1;
            }
            Some(_) => {
                // Multi-byte characters are never valid conversions; take the whole char.
                let rest = &template[i..];
                let conv = rest.chars().next().map(String::from).unwrap_or_default();
                return Err(invalid(format!(
                    "unsupported conversion '{}{}'",
                    &template[spec_start..i],
                    conv
                )));
            }
            None => return Err(invalid("dangling '%' at end of template".to_string())),
        }

        literal_start = i;
    }

    if literal_start < bytes.len() {
        segments.push(Segment::Literal(&template[literal_start..]));
    }

    Ok(segments)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_simple() {
        assert_eq!(render_iteration("case_%d", 3).unwrap(), "case_3");
        assert_eq!(
            render_iteration("ITERATED_ENSEMBLE_SMOOTHER%d", 0).unwrap(),
            "ITERATED_ENSEMBLE_SMOOTHER0"
        );
    }

    #[test]
    fn test_render_padded() {
        assert_eq!(render_iteration("iter%03d", 7).unwrap(), "iter007");
        assert_eq!(render_iteration("iter%3i", 7).unwrap(), "iter  7");
    }

    #[test]
    fn test_render_without_placeholder() {
        assert_eq!(render_iteration("fixed", 2).unwrap(), "fixed");
        assert!(!template_has_placeholder("fixed"));
        assert!(template_has_placeholder("run_%d"));
    }

    #[test]
    fn test_literal_percent() {
        assert_eq!(render_iteration("100%%/run%d", 1).unwrap(), "100%/run1");
        assert!(!template_has_placeholder("100%%"));
    }

    #[test]
    fn test_rejects_string_conversion() {
        let err = render_iteration("case_%s", 1).unwrap_err();
        assert!(err.is_template_error());
        assert!(err.to_string().contains("'%s'"));
    }

    #[test]
    fn test_rejects_two_conversions() {
        assert!(check_template("%d_%d").is_err());
    }

    #[test]
    fn test_rejects_dangling_percent() {
        assert!(check_template("case_%").is_err());
        assert!(check_template("case_%05").is_err());
    }

    #[test]
    fn test_multibyte_literals() {
        assert_eq!(render_iteration("größe_%d", 2).unwrap(), "größe_2");
        assert!(check_template("%é").is_err());
    }
}
