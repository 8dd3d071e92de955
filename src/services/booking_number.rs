use rand::Rng;

// Visually ambiguous glyphs excluded: I, O, L among letters; 0, 1 among digits.
const LETTERS: &[u8] = b"ABCDEFGHJKMNPQRSTUVWXYZ";
const DIGITS: &[u8] = b"23456789";

/// Generates an 8-character customer reference: 2 letters + 6 digits.
/// No uniqueness check; collision avoidance is the caller's concern.
pub fn generate() -> String {
    let mut rng = rand::thread_rng();
    let mut code = String::with_capacity(8);
    for _ in 0..2 {
        code.push(LETTERS[rng.gen_range(0..LETTERS.len())] as char);
    }
    for _ in 0..6 {
        code.push(DIGITS[rng.gen_range(0..DIGITS.len())] as char);
    }
    code
}

/// True when the uppercased input is exactly 2 ASCII letters followed by
/// 6 ASCII digits.
pub fn is_valid(code: &str) -> bool {
    let upper = code.to_uppercase();
    let bytes = upper.as_bytes();
    bytes.len() == 8
        && bytes[..2].iter().all(|b| b.is_ascii_uppercase())
        && bytes[2..].iter().all(|b| b.is_ascii_digit())
}

/// Display form "XX-NNNNNN". Invalid input passes through unchanged.
pub fn format(code: &str) -> String {
    if !is_valid(code) {
        return code.to_string();
    }
    let upper = code.to_uppercase();
    format!("{}-{}", &upper[..2], &upper[2..])
}
