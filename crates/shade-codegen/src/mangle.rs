//! Symbol-id-to-identifier mangling.
//!
//! Ported from `OpenGLCompiler::get_var_name`/`StringBuffer::operator<<
//! (symbol_id_t)`: spell the id out in base 26 using the letters `a`-`z`,
//! least-significant digit last, the way a spreadsheet names its columns
//! (`a, b, ..., z, aa, ab, ..., az, ba, ...`) but zero-based rather than
//! one-based.

/// Mangles a non-negative symbol id into its source-level variable name.
/// Panics if `id` is negative -- only allocated symbols (never `INVALID`,
/// `TEMP`, or `MEMBER`) are ever mangled.
pub fn mangle(id: i64) -> String {
    assert!(id >= 0, "mangle: symbol id must be allocated, got {id}");
    let mut digits = Vec::new();
    let mut x = id as u64;
    digits.push((x % 26) as u8);
    x -= x % 26;
    while x > 0 {
        x /= 26;
        digits.push(((x - 1) % 26) as u8);
        if x % 26 == 0 {
            x -= 26;
        } else {
            x -= x % 26;
        }
    }
    digits
        .into_iter()
        .rev()
        .map(|d| (b'a' + d) as char)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn first_letters_match_the_source_table() {
        assert_eq!(mangle(0), "a");
        assert_eq!(mangle(1), "b");
        assert_eq!(mangle(25), "z");
        assert_eq!(mangle(26), "aa");
        assert_eq!(mangle(27), "ab");
        assert_eq!(mangle(51), "az");
        assert_eq!(mangle(52), "ba");
        assert_eq!(mangle(701), "zz");
        assert_eq!(mangle(702), "aaa");
    }

    #[test]
    #[should_panic]
    fn negative_id_panics() {
        mangle(-1);
    }

    proptest! {
        #[test]
        fn mangle_is_injective(a in 0i64..200_000, b in 0i64..200_000) {
            if a != b {
                prop_assert_ne!(mangle(a), mangle(b));
            }
        }

        #[test]
        fn mangle_only_emits_lowercase_ascii_letters(id in 0i64..2_000_000) {
            let s = mangle(id);
            prop_assert!(!s.is_empty());
            prop_assert!(s.chars().all(|c| c.is_ascii_lowercase()));
        }
    }
}
