use crate::foundation::core::{Point, Vec2};
use crate::foundation::error::PathDataError;
use crate::path::lexer::Scanner;
use crate::path::segment::{ArcParams, ParsedPath, Segment};

/// Largest accepted path-data string, in bytes.
pub const MAX_PATH_DATA_BYTES: usize = 8 * 1024 * 1024;
/// Largest number of segments accepted from one path-data string.
pub const MAX_SEGMENTS: usize = 500_000;

/// Parse path data, discarding the whole input on any syntax error.
///
/// Returns an empty list for empty or invalid data; the failure is logged.
pub fn parse_path_data(d: &str) -> Vec<ParsedPath> {
    match try_parse_path_data(d) {
        Ok(paths) => paths,
        Err(err) => {
            tracing::warn!(%err, "discarding unparseable path data");
            Vec::new()
        }
    }
}

/// Parse path data into independently drawable sub-paths.
///
/// Every move command starts a new [`ParsedPath`]. Relative coordinates are resolved against
/// the running cursor, and `Z` appends a [`Segment::close`] back to the sub-path start.
/// Segment lengths are left at zero.
pub fn try_parse_path_data(d: &str) -> Result<Vec<ParsedPath>, PathDataError> {
    if d.len() > MAX_PATH_DATA_BYTES {
        return Err(PathDataError::new(
            0,
            format!("path data exceeds {MAX_PATH_DATA_BYTES} bytes"),
        ));
    }

    let mut s = Scanner::new(d);
    let mut b = Builder::default();

    while !s.at_end() {
        let offset = s.offset();
        let Some(cmd) = s.command() else {
            return Err(PathDataError::new(offset, "expected command letter"));
        };
        if b.current.is_none() && !matches!(cmd, b'M' | b'm') {
            return Err(PathDataError::new(
                offset,
                "path data must begin with a move command",
            ));
        }

        b.apply(cmd, &mut s)?;
        if matches!(cmd, b'Z' | b'z') {
            continue;
        }

        // Extra coordinate sets repeat the command; after a move they are line-tos.
        let repeat = match cmd {
            b'M' => b'L',
            b'm' => b'l',
            c => c,
        };
        while s.has_number() {
            b.apply(repeat, &mut s)?;
        }
    }

    b.finish();
    Ok(b.paths)
}

#[derive(Default)]
struct Builder {
    paths: Vec<ParsedPath>,
    current: Option<Pending>,
    cursor: Point,
    last_cubic_ctrl: Option<Point>,
    last_quad_ctrl: Option<Point>,
    segment_count: usize,
}

struct Pending {
    start: Point,
    segments: Vec<Segment>,
}

impl Builder {
    fn apply(&mut self, cmd: u8, s: &mut Scanner<'_>) -> Result<(), PathDataError> {
        let offset = s.offset();
        let base = if cmd.is_ascii_lowercase() {
            self.cursor.to_vec2()
        } else {
            Vec2::ZERO
        };
        let cursor = self.cursor;

        match cmd.to_ascii_uppercase() {
            b'M' => {
                let p = point(s)? + base;
                self.move_to(p);
            }
            b'L' => {
                let p = point(s)? + base;
                self.push(Segment::line(cursor, p), offset)?;
            }
            b'H' => {
                let x = s.number()? + base.x;
                self.push(Segment::line(cursor, Point::new(x, cursor.y)), offset)?;
            }
            b'V' => {
                let y = s.number()? + base.y;
                self.push(Segment::line(cursor, Point::new(cursor.x, y)), offset)?;
            }
            b'C' => {
                let c1 = point(s)? + base;
                let c2 = point(s)? + base;
                let p = point(s)? + base;
                self.push(Segment::cubic(cursor, c1, c2, p), offset)?;
                self.last_cubic_ctrl = Some(c2);
                return Ok(());
            }
            b'S' => {
                let c1 = reflect(self.last_cubic_ctrl, cursor);
                let c2 = point(s)? + base;
                let p = point(s)? + base;
                self.push(Segment::cubic(cursor, c1, c2, p), offset)?;
                self.last_cubic_ctrl = Some(c2);
                return Ok(());
            }
            b'Q' => {
                let c = point(s)? + base;
                let p = point(s)? + base;
                self.push(Segment::quadratic(cursor, c, p), offset)?;
                self.last_quad_ctrl = Some(c);
                return Ok(());
            }
            b'T' => {
                let c = reflect(self.last_quad_ctrl, cursor);
                let p = point(s)? + base;
                self.push(Segment::quadratic(cursor, c, p), offset)?;
                self.last_quad_ctrl = Some(c);
                return Ok(());
            }
            b'A' => {
                let rx = s.number()?.abs();
                let ry = s.number()?.abs();
                let x_rotation_deg = s.number()?;
                let large_arc = s.flag()?;
                let sweep = s.flag()?;
                let p = point(s)? + base;
                if p != cursor {
                    let seg = if rx == 0.0 || ry == 0.0 {
                        Segment::line(cursor, p)
                    } else {
                        Segment::arc(
                            cursor,
                            p,
                            ArcParams {
                                radii: Vec2::new(rx, ry),
                                x_rotation_deg,
                                large_arc,
                                sweep,
                            },
                        )
                    };
                    self.push(seg, offset)?;
                }
            }
            b'Z' => {
                if let Some(start) = self.current.as_ref().map(|p| p.start) {
                    self.push(Segment::close(cursor, start), offset)?;
                }
            }
            _ => {
                return Err(PathDataError::new(
                    offset.saturating_sub(1),
                    format!("unknown path command '{}'", char::from(cmd)),
                ));
            }
        }

        self.last_cubic_ctrl = None;
        self.last_quad_ctrl = None;
        Ok(())
    }

    fn move_to(&mut self, p: Point) {
        self.finish();
        self.current = Some(Pending {
            start: p,
            segments: Vec::new(),
        });
        self.cursor = p;
    }

    fn push(&mut self, seg: Segment, offset: usize) -> Result<(), PathDataError> {
        let Some(current) = self.current.as_mut() else {
            return Err(PathDataError::new(
                offset,
                "drawing command before initial move",
            ));
        };
        self.segment_count += 1;
        if self.segment_count > MAX_SEGMENTS {
            return Err(PathDataError::new(
                offset,
                format!("path data exceeds {MAX_SEGMENTS} segments"),
            ));
        }
        self.cursor = seg.to;
        current.segments.push(seg);
        Ok(())
    }

    fn finish(&mut self) {
        if let Some(p) = self.current.take() {
            let id = self.paths.len().to_string();
            self.paths
                .push(ParsedPath::from_segments(id, p.start, p.segments));
        }
    }
}

fn point(s: &mut Scanner<'_>) -> Result<Point, PathDataError> {
    let x = s.number()?;
    let y = s.number()?;
    Ok(Point::new(x, y))
}

/// Reflect the previous control point through `cursor`; without one the cursor itself is used.
fn reflect(prev: Option<Point>, cursor: Point) -> Point {
    match prev {
        Some(c) => cursor + (cursor - c),
        None => cursor,
    }
}

#[cfg(test)]
#[path = "../../tests/unit/path/parser.rs"]
mod tests;
