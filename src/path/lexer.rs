use crate::foundation::error::PathDataError;

/// Byte cursor over path data.
///
/// Path data cannot be lexed up front: arc flags may be packed against the following number
/// (`a10 10 0 1150 50`), so the parser pulls numbers and flags on demand.
pub(crate) struct Scanner<'a> {
    src: &'a str,
    bytes: &'a [u8],
    pos: usize,
}

impl<'a> Scanner<'a> {
    pub(crate) fn new(src: &'a str) -> Self {
        Self {
            src,
            bytes: src.as_bytes(),
            pos: 0,
        }
    }

    pub(crate) fn offset(&self) -> usize {
        self.pos
    }

    pub(crate) fn skip_separators(&mut self) {
        while let Some(&b) = self.bytes.get(self.pos) {
            if b.is_ascii_whitespace() || b == b',' {
                self.pos += 1;
            } else {
                break;
            }
        }
    }

    pub(crate) fn at_end(&mut self) -> bool {
        self.skip_separators();
        self.pos >= self.bytes.len()
    }

    /// Consume and return a command letter if one is next.
    pub(crate) fn command(&mut self) -> Option<u8> {
        self.skip_separators();
        let &b = self.bytes.get(self.pos)?;
        // `e`/`E` only ever appear inside exponents.
        if b.is_ascii_alphabetic() && b != b'e' && b != b'E' {
            self.pos += 1;
            Some(b)
        } else {
            None
        }
    }

    /// `true` when the next token starts a number.
    pub(crate) fn has_number(&mut self) -> bool {
        self.skip_separators();
        match self.bytes.get(self.pos) {
            Some(b) if b.is_ascii_digit() || *b == b'+' || *b == b'-' => true,
            Some(b'.') => self
                .bytes
                .get(self.pos + 1)
                .is_some_and(|b| b.is_ascii_digit()),
            _ => false,
        }
    }

    /// Number: `[+-]?([0-9]+(.[0-9]*)?|.[0-9]+)([eE][+-]?[0-9]+)?`.
    pub(crate) fn number(&mut self) -> Result<f64, PathDataError> {
        self.skip_separators();
        let start = self.pos;
        let bytes = self.bytes;
        let mut i = start;

        if i < bytes.len() && matches!(bytes[i], b'+' | b'-') {
            i += 1;
        }

        let int_start = i;
        while i < bytes.len() && bytes[i].is_ascii_digit() {
            i += 1;
        }
        let mut digits = i - int_start;

        if i < bytes.len() && bytes[i] == b'.' {
            i += 1;
            let frac_start = i;
            while i < bytes.len() && bytes[i].is_ascii_digit() {
                i += 1;
            }
            digits += i - frac_start;
        }

        if digits == 0 {
            return Err(PathDataError::new(start, "expected number"));
        }

        if i < bytes.len() && matches!(bytes[i], b'e' | b'E') {
            let e_pos = i;
            i += 1;
            if i < bytes.len() && matches!(bytes[i], b'+' | b'-') {
                i += 1;
            }
            let exp_start = i;
            while i < bytes.len() && bytes[i].is_ascii_digit() {
                i += 1;
            }
            if exp_start == i {
                return Err(PathDataError::new(
                    e_pos,
                    "invalid number exponent (expected digits)",
                ));
            }
        }

        let v: f64 = self.src[start..i]
            .parse()
            .map_err(|_| PathDataError::new(start, "invalid number"))?;
        if !v.is_finite() {
            return Err(PathDataError::new(start, "number is not finite"));
        }
        self.pos = i;
        Ok(v)
    }

    /// Arc flag: a single `0` or `1`, possibly packed against what follows.
    pub(crate) fn flag(&mut self) -> Result<bool, PathDataError> {
        self.skip_separators();
        match self.bytes.get(self.pos) {
            Some(b'0') => {
                self.pos += 1;
                Ok(false)
            }
            Some(b'1') => {
                self.pos += 1;
                Ok(true)
            }
            _ => Err(PathDataError::new(self.pos, "expected arc flag (0 or 1)")),
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/path/lexer.rs"]
mod tests;
