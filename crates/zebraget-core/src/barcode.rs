//! # Barcode Codec
//!
//! Checksum validation and pixel rendering for product barcodes.
//!
//! ## EAN-13 Layout
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    EAN-13 Symbol (95 modules)                           │
//! │                                                                         │
//! │  quiet │ 101 │ d1 … d6 (L/G) │ 01010 │ d7 … d12 (R) │ 101 │ quiet       │
//! │   9    │  3  │    6 × 7      │   5   │    6 × 7     │  3  │   9         │
//! │                                                                         │
//! │  d0 (first digit) is not drawn: it selects the L/G parity pattern of   │
//! │  d1…d6. d12 is the check digit.                                         │
//! │                                                                         │
//! │  Check digit:                                                           │
//! │    sum = Σ d[i] × (1 if i even else 3),  i = 0..11                      │
//! │    check = (10 − sum mod 10) mod 10                                     │
//! │                                                                         │
//! │  4006381333931:                                                         │
//! │    4+0+0+18+3+24+1+9+3+9+9+27 = 107 → (10 − 7) mod 10 = 3 ✓             │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Symbology Handling
//! `validate` and `render` treat unknown tags differently:
//! - `validate` passes any payload for an unrecognized tag.
//! - `render` encodes an unrecognized tag as EAN-13, so a payload that is not
//!   EAN-13-shaped fails there instead.
//!
//! Both functions are pure and share no state.

use crate::error::{BarcodeError, RenderError, RenderResult};
use crate::types::{Product, Symbology};
use crate::{BARCODE_HEIGHT, BARCODE_WIDTH};

// =============================================================================
// Constants
// =============================================================================

/// Digits in a complete EAN-13 code.
pub const EAN13_LENGTH: usize = 13;

/// Modules (bars + spaces) in an EAN-13 symbol, excluding quiet zones.
pub const EAN13_MODULES: usize = 95;

/// Quiet zone on each side, in modules.
pub const EAN13_QUIET_ZONE: usize = 9;

/// Left-hand odd parity ("L") patterns, 7 modules each, MSB first.
const L_PATTERNS: [u8; 10] = [0x0D, 0x19, 0x13, 0x3D, 0x23, 0x31, 0x2F, 0x3B, 0x37, 0x0B];

/// L/G parity of digits 1..=6 selected by the first digit (1 = G).
const FIRST_DIGIT_PARITY: [u8; 10] = [0x00, 0x0B, 0x0D, 0x0E, 0x13, 0x19, 0x1C, 0x15, 0x16, 0x1A];

const START_GUARD: [bool; 3] = [true, false, true];
const CENTER_GUARD: [bool; 5] = [false, true, false, true, false];
const END_GUARD: [bool; 3] = [true, false, true];

// =============================================================================
// Validation
// =============================================================================

/// Validates a barcode payload against its symbology's checksum rule.
///
/// ## Rules
/// - `EAN_13`: exactly 13 ASCII digits and a correct check digit.
/// - Any other tag: always `true`.
///
/// ## Example
/// ```rust
/// use zebraget_core::barcode::validate;
///
/// assert!(validate("4006381333931", "EAN_13"));
/// assert!(!validate("4006381333932", "EAN_13"));
/// assert!(!validate("123", "EAN_13"));
/// assert!(validate("anything", "UNKNOWN_FORMAT"));
/// ```
pub fn validate(payload: &str, symbology: &str) -> bool {
    match Symbology::from_tag(symbology) {
        Symbology::Ean13 => is_valid_ean13(payload),
        Symbology::Unrecognized(_) => true,
    }
}

/// Returns true if `code` is a well-formed EAN-13 with a correct check digit.
pub fn is_valid_ean13(code: &str) -> bool {
    let bytes = code.as_bytes();
    if bytes.len() != EAN13_LENGTH || !bytes.iter().all(u8::is_ascii_digit) {
        return false;
    }

    match ean13_check_digit(&code[..EAN13_LENGTH - 1]) {
        Some(expected) => bytes[EAN13_LENGTH - 1] - b'0' == expected,
        None => false,
    }
}

/// Computes the EAN-13 check digit for the first 12 digits.
///
/// Returns `None` unless `digits` is exactly 12 ASCII digits.
pub fn ean13_check_digit(digits: &str) -> Option<u8> {
    let bytes = digits.as_bytes();
    if bytes.len() != EAN13_LENGTH - 1 || !bytes.iter().all(u8::is_ascii_digit) {
        return None;
    }

    let sum: u32 = bytes
        .iter()
        .enumerate()
        .map(|(i, b)| {
            let digit = u32::from(b - b'0');
            if i % 2 == 0 {
                digit
            } else {
                digit * 3
            }
        })
        .sum();

    Some(((10 - sum % 10) % 10) as u8)
}

// =============================================================================
// Pixel Matrix
// =============================================================================

/// A monochrome 2-D grid; `true` is a black cell.
///
/// Platform code converts this into its own image type at the presentation
/// boundary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PixelMatrix {
    width: usize,
    height: usize,
    cells: Vec<bool>,
}

impl PixelMatrix {
    /// Creates an all-white matrix.
    pub fn new(width: usize, height: usize) -> Self {
        PixelMatrix {
            width,
            height,
            cells: vec![false; width * height],
        }
    }

    /// Width in cells.
    #[inline]
    pub fn width(&self) -> usize {
        self.width
    }

    /// Height in cells.
    #[inline]
    pub fn height(&self) -> usize {
        self.height
    }

    /// Returns the cell at `(x, y)`; out-of-range reads are white.
    pub fn get(&self, x: usize, y: usize) -> bool {
        if x >= self.width || y >= self.height {
            return false;
        }
        self.cells[y * self.width + x]
    }

    /// Sets the cell at `(x, y)`. Out-of-range writes are ignored.
    pub fn set(&mut self, x: usize, y: usize, black: bool) {
        if x < self.width && y < self.height {
            self.cells[y * self.width + x] = black;
        }
    }

    /// Returns row `y` as a slice.
    pub fn row(&self, y: usize) -> Option<&[bool]> {
        if y >= self.height {
            return None;
        }
        let start = y * self.width;
        Some(&self.cells[start..start + self.width])
    }

    /// Number of black cells.
    pub fn black_count(&self) -> usize {
        self.cells.iter().filter(|c| **c).count()
    }

    /// Downsamples the matrix into text rows for terminal display.
    ///
    /// Every `step`-th column is sampled; `lines` rows are taken evenly from
    /// the height. Black cells print as `█`.
    pub fn to_text_rows(&self, step: usize, lines: usize) -> Vec<String> {
        let step = step.max(1);
        let lines = lines.clamp(1, self.height.max(1));

        (0..lines)
            .map(|line| {
                let y = line * self.height / lines;
                (0..self.width)
                    .step_by(step)
                    .map(|x| if self.get(x, y) { '█' } else { ' ' })
                    .collect()
            })
            .collect()
    }
}

// =============================================================================
// Rendering
// =============================================================================

/// Renders a barcode payload into a 600 × 300 pixel matrix.
///
/// Unrecognized symbology tags are encoded as EAN-13. Fails when the payload
/// cannot be encoded: wrong length, non-digit characters or a bad check digit.
/// Identical inputs always give identical output.
pub fn render(payload: &str, symbology: &str) -> RenderResult<PixelMatrix> {
    match Symbology::from_tag(symbology) {
        // EAN-13 is the only encoder; unknown tags use it too
        Symbology::Ean13 | Symbology::Unrecognized(_) => {
            let modules = encode_ean13(payload)?;
            Ok(scale_modules(&modules, BARCODE_WIDTH, BARCODE_HEIGHT))
        }
    }
}

/// Encodes an EAN-13 payload into its 95 modules.
///
/// A 12-digit payload gets its check digit appended; a 13-digit payload must
/// already carry the correct one.
pub fn encode_ean13(payload: &str) -> RenderResult<[bool; EAN13_MODULES]> {
    let len = payload.chars().count();
    if len != EAN13_LENGTH && len != EAN13_LENGTH - 1 {
        return Err(RenderError::InvalidLength { len });
    }

    if let Some((position, ch)) = payload.chars().enumerate().find(|(_, c)| !c.is_ascii_digit()) {
        return Err(RenderError::InvalidCharacter { ch, position });
    }

    let mut digits: Vec<u8> = payload.bytes().map(|b| b - b'0').collect();
    let expected = ean13_check_digit(&payload[..EAN13_LENGTH - 1])
        .ok_or(RenderError::InvalidLength { len })?;

    if digits.len() == EAN13_LENGTH - 1 {
        digits.push(expected);
    } else if digits[EAN13_LENGTH - 1] != expected {
        return Err(RenderError::ChecksumMismatch {
            expected,
            actual: digits[EAN13_LENGTH - 1],
        });
    }

    let parity = FIRST_DIGIT_PARITY[digits[0] as usize];
    let mut modules = [false; EAN13_MODULES];
    let mut pos = 0;

    pos = append(&mut modules, pos, &START_GUARD);
    for (i, &digit) in digits[1..7].iter().enumerate() {
        let use_g = (parity >> (5 - i)) & 1 == 1;
        let pattern = if use_g { g_pattern(digit) } else { L_PATTERNS[digit as usize] };
        pos = append_pattern(&mut modules, pos, pattern);
    }
    pos = append(&mut modules, pos, &CENTER_GUARD);
    for &digit in &digits[7..13] {
        pos = append_pattern(&mut modules, pos, r_pattern(digit));
    }
    pos = append(&mut modules, pos, &END_GUARD);
    debug_assert_eq!(pos, EAN13_MODULES);

    Ok(modules)
}

/// Right-hand ("R") pattern: complement of L.
fn r_pattern(digit: u8) -> u8 {
    !L_PATTERNS[digit as usize] & 0x7F
}

/// Left-hand even parity ("G") pattern: R read backwards.
fn g_pattern(digit: u8) -> u8 {
    let r = r_pattern(digit);
    (0..7).fold(0u8, |acc, bit| acc | (((r >> bit) & 1) << (6 - bit)))
}

fn append(modules: &mut [bool], pos: usize, bits: &[bool]) -> usize {
    modules[pos..pos + bits.len()].copy_from_slice(bits);
    pos + bits.len()
}

fn append_pattern(modules: &mut [bool], pos: usize, pattern: u8) -> usize {
    for bit in 0..7 {
        modules[pos + bit] = (pattern >> (6 - bit)) & 1 == 1;
    }
    pos + 7
}

/// Scales a module row to the target size.
///
/// Each module becomes `multiple` pixels wide, where `multiple` is the largest
/// factor that fits the symbol plus quiet zones; leftover width is split
/// evenly as padding. All rows are identical.
fn scale_modules(modules: &[bool], width: usize, height: usize) -> PixelMatrix {
    let full_width = modules.len() + 2 * EAN13_QUIET_ZONE;
    let output_width = width.max(full_width);
    let output_height = height.max(1);
    let multiple = output_width / full_width;
    let left_padding = (output_width - modules.len() * multiple) / 2;

    let mut matrix = PixelMatrix::new(output_width, output_height);
    for (i, &black) in modules.iter().enumerate() {
        if !black {
            continue;
        }
        let x0 = left_padding + i * multiple;
        for x in x0..x0 + multiple {
            for y in 0..output_height {
                matrix.set(x, y, true);
            }
        }
    }
    matrix
}

// =============================================================================
// Detail View Flow
// =============================================================================

/// Runs the product detail flow: validate, then render.
///
/// ## Returns
/// * `Ok(matrix)` - show the image with the payload underneath
/// * `Err(InvalidBarcodePayload)` - checksum failed
/// * `Err(RenderFailure)` - encoder refused the payload
pub fn prepare(product: &Product) -> Result<PixelMatrix, BarcodeError> {
    let tag = product.symbology_tag();

    if !validate(&product.barcode_value, tag) {
        let symbology = match product.symbology() {
            Symbology::Ean13 => "EAN-13".to_string(),
            other => other.to_string(),
        };
        return Err(BarcodeError::InvalidBarcodePayload {
            value: product.barcode_value.clone(),
            symbology,
        });
    }

    render(&product.barcode_value, tag).map_err(BarcodeError::RenderFailure)
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn bits(s: &str) -> Vec<bool> {
        s.chars().map(|c| c == '1').collect()
    }

    #[test]
    fn test_validate_known_codes() {
        assert!(validate("4006381333931", "EAN_13"));
        assert!(validate("5901234123457", "EAN_13"));
        assert!(validate("9780201379624", "EAN_13"));

        assert!(!validate("4006381333932", "EAN_13"));
        assert!(!validate("123", "EAN_13"));
        assert!(!validate("12345678901a", "EAN_13"));
        assert!(!validate("400638133393a", "EAN_13"));
        assert!(!validate("", "EAN_13"));
    }

    #[test]
    fn test_validate_matches_check_digit_for_every_last_digit() {
        let base = "590123412345";
        let expected = ean13_check_digit(base).unwrap();
        for last in 0..10u8 {
            let code = format!("{}{}", base, last);
            assert_eq!(validate(&code, "EAN_13"), last == expected, "{}", code);
        }
    }

    #[test]
    fn test_validate_unknown_symbology_is_permissive() {
        assert!(validate("", "UNKNOWN_FORMAT"));
        assert!(validate("not a barcode", "UNKNOWN_FORMAT"));
        assert!(validate("4006381333932", "QR_CODE"));
    }

    #[test]
    fn test_check_digit() {
        assert_eq!(ean13_check_digit("400638133393"), Some(1));
        assert_eq!(ean13_check_digit("000000000000"), Some(0));
        assert_eq!(ean13_check_digit("40063813339"), None);
        assert_eq!(ean13_check_digit("40063813339x"), None);
    }

    #[test]
    fn test_encode_guards_and_first_digit() {
        let modules = encode_ean13("4006381333931").unwrap();
        assert_eq!(&modules[0..3], bits("101").as_slice());
        assert_eq!(&modules[45..50], bits("01010").as_slice());
        assert_eq!(&modules[92..95], bits("101").as_slice());

        // First digit 4 → parity LGLLGG; d1 = 0 in L, d2 = 0 in G
        assert_eq!(&modules[3..10], bits("0001101").as_slice());
        assert_eq!(&modules[10..17], bits("0100111").as_slice());

        // d12 = 1 in R
        assert_eq!(&modules[85..92], bits("1100110").as_slice());
    }

    #[test]
    fn test_encode_twelve_digits_appends_check_digit() {
        let short = encode_ean13("400638133393").unwrap();
        let full = encode_ean13("4006381333931").unwrap();
        assert_eq!(short, full);
    }

    #[test]
    fn test_encode_rejects_bad_payloads() {
        assert_eq!(
            encode_ean13("123"),
            Err(RenderError::InvalidLength { len: 3 })
        );
        assert_eq!(
            encode_ean13("40063813339a1"),
            Err(RenderError::InvalidCharacter { ch: 'a', position: 11 })
        );
        assert_eq!(
            encode_ean13("4006381333932"),
            Err(RenderError::ChecksumMismatch { expected: 1, actual: 2 })
        );
    }

    #[test]
    fn test_render_dimensions_and_layout() {
        let matrix = render("4006381333931", "EAN_13").unwrap();
        assert_eq!(matrix.width(), 600);
        assert_eq!(matrix.height(), 300);

        // 600 / (95 + 18) = 5 px per module, (600 - 475) / 2 = 62 px padding
        assert!(!matrix.get(61, 0));
        assert!(matrix.get(62, 0));
        assert!(matrix.get(66, 299));
        assert!(!matrix.get(67, 150));
        assert!(matrix.get(72, 150));
        assert!(!matrix.get(537, 0));

        // Every row is identical
        assert_eq!(matrix.row(0), matrix.row(299));
    }

    #[test]
    fn test_render_is_deterministic() {
        let a = render("5901234123457", "EAN_13").unwrap();
        let b = render("5901234123457", "EAN_13").unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_render_unknown_symbology_falls_back_to_ean13() {
        let fallback = render("4006381333931", "UNKNOWN_FORMAT").unwrap();
        let ean = render("4006381333931", "EAN_13").unwrap();
        assert_eq!(fallback, ean);

        assert!(render("123", "UNKNOWN_FORMAT").is_err());
    }

    #[test]
    fn test_prepare_flow() {
        let good = Product::new(1, "Milk", "", "4006381333931");
        assert!(prepare(&good).is_ok());

        let bad = Product::new(2, "Bread", "", "4006381333932");
        let err = prepare(&bad).unwrap_err();
        assert!(matches!(err, BarcodeError::InvalidBarcodePayload { .. }));
        assert_eq!(err.to_string(), "Invalid EAN-13 barcode: 4006381333932");

        // Passes validation (unknown tag) but cannot be encoded as EAN-13
        let odd = Product::new(3, "Box", "", "ABC-42").with_format("CODE_128");
        assert!(matches!(
            prepare(&odd).unwrap_err(),
            BarcodeError::RenderFailure(_)
        ));
    }

    #[test]
    fn test_text_rows() {
        let matrix = render("4006381333931", "EAN_13").unwrap();
        let rows = matrix.to_text_rows(5, 4);
        assert_eq!(rows.len(), 4);
        assert_eq!(rows[0].chars().count(), 120);
        assert_eq!(rows[0], rows[3]);
        assert!(rows[0].contains('█'));
    }
}
