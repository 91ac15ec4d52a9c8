//! Navigation key decoding for the full-screen session.
//!
//! Input arrives as raw chunks from the terminal; a chunk may hold several key
//! sequences (fast typing, key repeat over slow links). `split_sequences` cuts a
//! chunk into individual sequences and `parse_nav_key` maps each one.

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NavKey {
    Up,
    Down,
    PageUp,
    PageDown,
    Home,
    End,
    Escape,
}

const LEGACY_UP: [&str; 2] = ["\x1b[A", "\x1bOA"];
const LEGACY_DOWN: [&str; 2] = ["\x1b[B", "\x1bOB"];
const LEGACY_HOME: [&str; 4] = ["\x1b[H", "\x1bOH", "\x1b[1~", "\x1b[7~"];
const LEGACY_END: [&str; 4] = ["\x1b[F", "\x1bOF", "\x1b[4~", "\x1b[8~"];
const LEGACY_PAGE_UP: [&str; 2] = ["\x1b[5~", "\x1b[[5~"];
const LEGACY_PAGE_DOWN: [&str; 2] = ["\x1b[6~", "\x1b[[6~"];

/// Map one key sequence to a navigation key. Unrelated keys yield `None`.
pub fn parse_nav_key(data: &str) -> Option<NavKey> {
    if data == "\x1b" {
        return Some(NavKey::Escape);
    }
    let table: [(&[&str], NavKey); 6] = [
        (&LEGACY_UP, NavKey::Up),
        (&LEGACY_DOWN, NavKey::Down),
        (&LEGACY_PAGE_UP, NavKey::PageUp),
        (&LEGACY_PAGE_DOWN, NavKey::PageDown),
        (&LEGACY_HOME, NavKey::Home),
        (&LEGACY_END, NavKey::End),
    ];
    table
        .iter()
        .find(|(sequences, _)| sequences.contains(&data))
        .map(|(_, key)| *key)
}

/// Split a raw input chunk into individual key sequences.
///
/// Recognises CSI (`ESC [ params final`, including the `ESC [ [` function-key
/// variant) and SS3 (`ESC O x`). An ESC that does not start either form stands on
/// its own; every other character is its own sequence.
pub fn split_sequences(chunk: &str) -> Vec<&str> {
    let bytes = chunk.as_bytes();
    let mut out = Vec::new();
    let mut idx = 0;

    while idx < bytes.len() {
        let start = idx;
        if bytes[idx] != 0x1b {
            let ch_len = chunk[idx..].chars().next().map(char::len_utf8).unwrap_or(1);
            idx += ch_len;
            out.push(&chunk[start..idx]);
            continue;
        }

        idx += 1;
        match bytes.get(idx) {
            Some(b'[') => {
                idx += 1;
                if bytes.get(idx) == Some(&b'[') {
                    idx += 1;
                }
                while idx < bytes.len() && !(0x40..=0x7e).contains(&bytes[idx]) {
                    idx += 1;
                }
                idx = (idx + 1).min(bytes.len());
            }
            Some(b'O') if bytes.get(idx + 1).is_some_and(u8::is_ascii) => {
                idx += 2;
            }
            _ => {}
        }
        out.push(&chunk[start..idx]);
    }

    out
}

/// Decode every navigation key in a raw chunk, in arrival order.
pub fn decode_nav_keys(chunk: &str) -> Vec<NavKey> {
    split_sequences(chunk)
        .into_iter()
        .filter_map(parse_nav_key)
        .collect()
}
