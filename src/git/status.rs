//! Parsing of `git status --porcelain` (v1) output.

/// Paths with something to stage, in output order, without duplicates.
///
/// Kept: untracked files, entries with a working-tree change, and rename or
/// copy destinations. Index-only entries (`M `, `A `, `D `) and ignored
/// entries (`!!`) are skipped. Quoted paths are un-escaped.
pub fn parse_porcelain(output: &str) -> Vec<String> {
    let mut files: Vec<String> = Vec::new();

    for line in output.lines() {
        let Some(path) = parse_line(line) else {
            continue;
        };
        if !files.contains(&path) {
            files.push(path);
        }
    }

    files
}

fn parse_line(line: &str) -> Option<String> {
    if line.len() < 4 {
        return None;
    }
    let status = line.get(..2)?;
    if status == "!!" {
        return None;
    }
    let field = line.get(2..)?.strip_prefix(' ')?;

    let is_rename = status.contains('R') || status.contains('C');
    let worktree_clean = status.get(1..) == Some(" ");
    if worktree_clean && !is_rename {
        // Already fully staged; `git add` on a staged deletion fails.
        return None;
    }
    let (first, remainder) = read_path(field, is_rename);
    if is_rename && let Some(dest) = remainder.strip_prefix(" -> ") {
        let (dest, _) = read_path(dest, false);
        return Some(dest).filter(|p| !p.is_empty());
    }

    Some(first).filter(|p| !p.is_empty())
}

/// Read one path field; returns the path and the unconsumed input.
///
/// With `split_rename`, an unquoted field stops at the first ` -> `.
fn read_path(field: &str, split_rename: bool) -> (String, &str) {
    if let Some(quoted) = field.strip_prefix('"') {
        return unquote(quoted);
    }
    match field.find(" -> ").filter(|_| split_rename) {
        Some(idx) => (field[..idx].to_string(), &field[idx..]),
        None => (field.to_string(), ""),
    }
}

/// Decode a C-style quoted path (opening quote already consumed).
///
/// Octal escapes are raw bytes, so multi-byte UTF-8 names decode correctly.
/// Escapes above `\377` become U+FFFD.
fn unquote(input: &str) -> (String, &str) {
    let bytes = input.as_bytes();
    let mut out: Vec<u8> = Vec::with_capacity(bytes.len());
    let mut i = 0;

    while i < bytes.len() {
        match bytes[i] {
            b'"' => {
                return (String::from_utf8_lossy(&out).into_owned(), &input[i + 1..]);
            }
            b'\\' if i + 1 < bytes.len() => {
                let next = bytes[i + 1];
                match next {
                    b'0'..=b'7' => {
                        let digits = bytes[i + 1..]
                            .iter()
                            .take(3)
                            .take_while(|b| (b'0'..=b'7').contains(*b))
                            .count();
                        let value = bytes[i + 1..i + 1 + digits]
                            .iter()
                            .fold(0u32, |acc, b| acc * 8 + u32::from(b - b'0'));
                        match u8::try_from(value) {
                            Ok(byte) => out.push(byte),
                            Err(_) => out.extend_from_slice("\u{FFFD}".as_bytes()),
                        }
                        i += 1 + digits;
                        continue;
                    }
                    b'n' => out.push(b'\n'),
                    b't' => out.push(b'\t'),
                    b'r' => out.push(b'\r'),
                    b'a' => out.push(0x07),
                    b'b' => out.push(0x08),
                    b'f' => out.push(0x0c),
                    b'v' => out.push(0x0b),
                    other => out.push(other),
                }
                i += 2;
            }
            other => {
                out.push(other);
                i += 1;
            }
        }
    }

    (String::from_utf8_lossy(&out).into_owned(), "")
}
