//! Byte-to-literal encoding
//!
//! Turns raw bytes into `0x..` tokens for embedding in array-literal syntax.

/// Number of literal tokens per rendered row
pub const LITERALS_PER_ROW: usize = 16;

/// Encode each byte as a fixed-width `0x..` literal, preserving order
pub fn byte_literals(bytes: &[u8]) -> Vec<String> {
    bytes
        .iter()
        .map(|byte| format!("0x{:02x}", byte))
        .collect()
}

/// Lay out the literals of `bytes` as comma-separated rows, each prefixed with `indent`
///
/// Returns `None` for an empty input so the caller can render an empty array
/// without a stray blank line. The last literal has no trailing comma.
pub fn render_literal_rows(bytes: &[u8], indent: &str) -> Option<String> {
    if bytes.is_empty() {
        return None;
    }

    let literals = byte_literals(bytes);
    let rows: Vec<String> = literals
        .chunks(LITERALS_PER_ROW)
        .map(|row| format!("{}{}", indent, row.join(", ")))
        .collect();

    Some(rows.join(",\n"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_literals_are_fixed_width_lowercase() {
        let literals = byte_literals(&[0x00, 0x0a, 0xb5, 0xff]);
        assert_eq!(literals, vec!["0x00", "0x0a", "0xb5", "0xff"]);
        assert!(literals.iter().all(|l| l.len() == 4));
    }

    #[test]
    fn test_empty_input() {
        assert!(byte_literals(&[]).is_empty());
        assert_eq!(render_literal_rows(&[], "    "), None);
    }

    #[test]
    fn test_single_row() {
        let rendered = render_literal_rows(&[0x01, 0x02, 0x03], "        ").unwrap();
        assert_eq!(rendered, "        0x01, 0x02, 0x03");
    }

    #[test]
    fn test_rows_wrap_without_trailing_comma() {
        let data: Vec<u8> = (0..18).collect();
        let rendered = render_literal_rows(&data, "  ").unwrap();
        let lines: Vec<&str> = rendered.lines().collect();

        assert_eq!(lines.len(), 2);
        assert!(lines[0].starts_with("  0x00, 0x01"));
        assert!(lines[0].ends_with("0x0f,"));
        assert_eq!(lines[1], "  0x10, 0x11");
    }

    #[test]
    fn test_every_byte_value_in_order() {
        let data: Vec<u8> = (0..=255).collect();
        let literals = byte_literals(&data);

        assert_eq!(literals.len(), 256);
        for (value, literal) in literals.iter().enumerate() {
            let parsed = u8::from_str_radix(&literal[2..], 16).unwrap();
            assert_eq!(parsed as usize, value);
        }
    }
}
