use std::io::{self, BufRead, Read};

/// One request line read from the sidecar's input.
#[derive(Debug, PartialEq, Eq)]
pub enum Line {
    Text(String),
    /// The line exceeded the limit; the rest of it was discarded unread.
    TooLarge,
    NotUtf8(String),
}

/// Reads up to the next `\n`, buffering at most `max_bytes + 1` bytes.
/// `Ok(None)` at end of input.
pub fn read_line<R: BufRead>(reader: &mut R, max_bytes: usize) -> io::Result<Option<Line>> {
    let mut buf = Vec::new();
    let limit = u64::try_from(max_bytes).unwrap_or(u64::MAX).saturating_add(1);
    let n = reader.by_ref().take(limit).read_until(b'\n', &mut buf)?;
    if n == 0 {
        return Ok(None);
    }

    let terminated = buf.last() == Some(&b'\n');
    if terminated {
        buf.pop();
        if buf.last() == Some(&b'\r') {
            buf.pop();
        }
    }
    if buf.len() > max_bytes {
        if !terminated {
            discard_rest(reader)?;
        }
        return Ok(Some(Line::TooLarge));
    }

    Ok(Some(match String::from_utf8(buf) {
        Ok(text) => Line::Text(text),
        Err(e) => Line::NotUtf8(e.utf8_error().to_string()),
    }))
}

fn discard_rest<R: BufRead>(reader: &mut R) -> io::Result<()> {
    loop {
        let available = reader.fill_buf()?;
        if available.is_empty() {
            return Ok(());
        }
        if let Some(pos) = available.iter().position(|b| *b == b'\n') {
            reader.consume(pos + 1);
            return Ok(());
        }
        let len = available.len();
        reader.consume(len);
    }
}
