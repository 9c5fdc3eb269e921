//! Pieces-file text format: parses named piece definitions out of a text
//! blob of `piece X` stanzas.
//!
//! Grounded in `original_source/game/pieces.go`'s `ParsePieces`. The
//! stanza grammar is unchanged; `rotate`'s default differs from the
//! original only in name (this crate's `rotate` counts cardinal
//! rotations, defaulting to 1, where the original's defaulted to 0 for
//! the same "no extra rotation" meaning — see DESIGN.md).

use std::collections::HashMap;

use crate::error::PiecesFileError;
use crate::grid::Grid2D;
use crate::piece::Piece;

struct Stanza {
    line: usize,
    name: char,
    rotate: Option<(usize, i64)>,
    color: Option<(usize, String)>,
    shape_lines: Vec<String>,
}

/// Parses a pieces file into a map of piece name to fully-built `Piece`.
pub fn parse_pieces(text: &str) -> Result<HashMap<char, Piece>, PiecesFileError> {
    let lines: Vec<&str> = text.lines().collect();
    let mut stanzas: Vec<Stanza> = Vec::new();

    let mut i = 0;
    while i < lines.len() {
        if !lines[i].starts_with("piece") {
            i += 1;
            continue;
        }
        let header_line = i + 1;
        let name = lines[i]
            .get(6..7)
            .and_then(|s| s.chars().next())
            .ok_or(PiecesFileError::MissingName { line: header_line })?;

        let mut rotate = None;
        let mut color = None;
        let mut shape_lines = Vec::new();
        let mut j = i + 1;
        while j < lines.len() && !lines[j].starts_with("piece") {
            let line_no = j + 1;
            if let Some(rest) = lines[j].strip_prefix("rotate") {
                let text = rest.trim();
                let value: i64 = text
                    .parse()
                    .map_err(|_| PiecesFileError::BadRotateSyntax {
                        line: line_no,
                        text: text.to_string(),
                    })?;
                rotate = Some((line_no, value));
            } else if let Some(rest) = lines[j].strip_prefix("color") {
                color = Some((line_no, rest.trim().to_string()));
            } else if !lines[j].trim().is_empty() {
                shape_lines.push(lines[j].to_string());
            }
            j += 1;
        }

        stanzas.push(Stanza {
            line: header_line,
            name,
            rotate,
            color,
            shape_lines,
        });
        i = j;
    }

    let mut pieces: HashMap<char, Piece> = HashMap::new();
    for stanza in stanzas {
        let rotate = match stanza.rotate {
            None => 1,
            Some((line, value)) => {
                if !matches!(value, 1 | 2 | 4) {
                    return Err(PiecesFileError::BadRotate { line, value });
                }
                value as u8
            }
        };
        let color = match stanza.color {
            None => [0, 0, 0],
            Some((line, text)) => parse_hex_color(line, &text)?,
        };

        let shape_text: String = stanza
            .shape_lines
            .iter()
            .map(|l| format!("{l}\n"))
            .collect();
        let shape = Grid2D::from_spec(&shape_text).map_err(|e| match e {
            crate::error::GridError::Empty => PiecesFileError::EmptyShape {
                line: stanza.line,
                name: stanza.name,
            },
            other => PiecesFileError::BadShape {
                line: stanza.line,
                name: stanza.name,
                source: other,
            },
        })?;
        // Trim away any all-false border rows/cols before the shape
        // reaches `Piece::new`, which requires a minimally bounding grid
        // (spec.md:36) — a pieces-file stanza is free to pad its shape
        // with blank rows/cols for legibility.
        let (bx, by, bw, bh) = shape.bounding_box().ok_or(PiecesFileError::EmptyShape {
            line: stanza.line,
            name: stanza.name,
        })?;
        let shape = shape.get_subgrid(bx, by, bw, bh);

        match pieces.get_mut(&stanza.name) {
            None => {
                pieces.insert(stanza.name, Piece::new(stanza.name, vec![shape], rotate, color));
            }
            Some(existing) => {
                if existing.shapes.len() >= 2 {
                    return Err(PiecesFileError::TooManyShapes {
                        line: stanza.line,
                        name: stanza.name,
                    });
                }
                existing.shapes.push(shape);
            }
        }
    }

    Ok(pieces)
}

fn parse_hex_color(line: usize, text: &str) -> Result<[u8; 3], PiecesFileError> {
    if text.len() != 6 || !text.chars().all(|c| c.is_ascii_hexdigit()) {
        return Err(PiecesFileError::BadColor {
            line,
            text: text.to_string(),
        });
    }
    let mut out = [0u8; 3];
    for (i, byte) in out.iter_mut().enumerate() {
        *byte = u8::from_str_radix(&text[i * 2..i * 2 + 2], 16).map_err(|_| PiecesFileError::BadColor {
            line,
            text: text.to_string(),
        })?;
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_single_piece() {
        let text = "piece o\nrotate 1\ncolor ff0000\n##\n##\n";
        let pieces = parse_pieces(text).unwrap();
        let o = &pieces[&'o'];
        assert_eq!(o.rotate, 1);
        assert_eq!(o.color, [255, 0, 0]);
        assert_eq!(o.shapes.len(), 1);
        assert_eq!(o.cell_count(), 4);
    }

    #[test]
    fn default_rotate_is_one_and_default_color_is_black() {
        let text = "piece i\n#\n#\n#\n";
        let pieces = parse_pieces(text).unwrap();
        let i = &pieces[&'i'];
        assert_eq!(i.rotate, 1);
        assert_eq!(i.color, [0, 0, 0]);
    }

    #[test]
    fn padded_shape_is_trimmed_to_bounding_box() {
        let text = "piece p\n...\n.#.\n...\n";
        let pieces = parse_pieces(text).unwrap();
        let p = &pieces[&'p'];
        assert_eq!(p.shapes[0].width(), 1);
        assert_eq!(p.shapes[0].height(), 1);
        assert_eq!(p.cell_count(), 1);
    }

    #[test]
    fn second_stanza_adds_chiral_shape() {
        let text = "piece s\nrotate 4\n##.\n.##\n\npiece s\nrotate 4\n.##\n##.\n";
        let pieces = parse_pieces(text).unwrap();
        assert_eq!(pieces[&'s'].shapes.len(), 2);
    }

    #[test]
    fn third_stanza_is_an_error() {
        let text = "piece s\n#\n\npiece s\n#\n\npiece s\n#\n";
        let err = parse_pieces(text).unwrap_err();
        assert!(matches!(err, PiecesFileError::TooManyShapes { name: 's', .. }));
    }

    #[test]
    fn bad_rotate_value_is_an_error() {
        let text = "piece x\nrotate 3\n#\n";
        let err = parse_pieces(text).unwrap_err();
        assert!(matches!(err, PiecesFileError::BadRotate { value: 3, .. }));
    }

    #[test]
    fn bad_rotate_syntax_is_an_error() {
        let text = "piece x\nrotate abc\n#\n";
        let err = parse_pieces(text).unwrap_err();
        assert!(matches!(err, PiecesFileError::BadRotateSyntax { .. }));
    }

    #[test]
    fn bad_color_is_an_error() {
        let text = "piece x\ncolor zzzzzz\n#\n";
        let err = parse_pieces(text).unwrap_err();
        assert!(matches!(err, PiecesFileError::BadColor { .. }));
    }

    #[test]
    fn empty_shape_is_an_error() {
        let text = "piece x\nrotate 1\n";
        let err = parse_pieces(text).unwrap_err();
        assert!(matches!(err, PiecesFileError::EmptyShape { .. }));
    }

    #[test]
    fn missing_name_is_an_error() {
        let text = "piece\n#\n";
        let err = parse_pieces(text).unwrap_err();
        assert!(matches!(err, PiecesFileError::MissingName { .. }));
    }
}
