//! Exact byte-pattern search.
//!
//! Maker notes are relocated by content rather than by offset arithmetic,
//! so the resolver needs a substring search over the whole file buffer.
//! This is a Boyer–Moore–Horspool search driven by a bad-character table.

/// Build the bad-character shift table for `needle`.
///
/// Each byte maps to its distance from the last occurrence in the needle to
/// the needle's end; bytes that never occur shift by the full needle length.
fn shift_table(needle: &[u8]) -> [usize; 256] {
    let n = needle.len();
    let mut table = [n; 256];
    for (i, &b) in needle.iter().enumerate() {
        table[b as usize] = n - 1 - i;
    }
    table
}

/// Find the lowest index at which `needle` occurs in `haystack`.
///
/// Each candidate window is compared right to left. On a mismatch at needle
/// position `p` the scan position advances by
/// `max(table[haystack[i]], needle.len() - p)`, which always moves the window
/// forward by at least one byte.
///
/// Returns `None` when the needle is empty, longer than the haystack, or
/// absent.
pub fn find_binary(haystack: &[u8], needle: &[u8]) -> Option<usize> {
    let n = needle.len();
    if n == 0 || n > haystack.len() {
        return None;
    }

    let table = shift_table(needle);
    let mut i = n - 1;

    while i < haystack.len() {
        let mut p = n - 1;
        loop {
            if haystack[i] != needle[p] {
                break;
            }
            if p == 0 {
                return Some(i);
            }
            i -= 1;
            p -= 1;
        }
        i += table[haystack[i] as usize].max(n - p);
    }

    None
}
