//! Name ordering for the customer list.
//!
//! Names compare as the operator expects in a Spanish-speaking stall: case and
//! accents are ignored at first (`ÁLVARO` sorts with `ALVARO`), `Ñ` is its own
//! letter right after `N`, and the raw string breaks ties so the order is total.

use std::cmp::Ordering;

/// Compare two customer names for display.
pub fn compare_names(a: &str, b: &str) -> Ordering {
    primary_key(a)
        .cmp(primary_key(b))
        .then_with(|| a.cmp(b))
}

fn primary_key(name: &str) -> impl Iterator<Item = (char, u8)> + '_ {
    name.chars().flat_map(char::to_uppercase).map(fold)
}

/// Map an uppercase char to `(base letter, rank)`. `rank` only separates
/// letters that share a base but are distinct in the alphabet (`N` / `Ñ`).
fn fold(ch: char) -> (char, u8) {
    let base = match ch {
        'À' | 'Á' | 'Â' | 'Ã' | 'Ä' | 'Å' => 'A',
        'Ç' => 'C',
        'È' | 'É' | 'Ê' | 'Ë' => 'E',
        'Ì' | 'Í' | 'Î' | 'Ï' => 'I',
        'Ò' | 'Ó' | 'Ô' | 'Õ' | 'Ö' | 'Ø' => 'O',
        'Ù' | 'Ú' | 'Û' | 'Ü' => 'U',
        'Ý' | 'Ÿ' => 'Y',
        'Ñ' => return ('N', 1),
        other => other,
    };
    (base, 0)
}
