//! Startup checks for mode combinations.
//!
//! Both predicates are evaluated once per run, before any search starts.

use crate::puzzle::Mode;

/// Check whether a row mode and a column mode may be combined.
///
/// Modes that interpret cell bits globally (bandaged bonds, lightning,
/// enablers, axis locks) must be used on both axes. Static modes only
/// combine with other static modes.
pub fn is_compatible(row_mode: Mode, col_mode: Mode) -> bool {
    if (row_mode.requires_symmetry() || col_mode.requires_symmetry()) && row_mode != col_mode {
        return false;
    }
    row_mode.is_static() == col_mode.is_static()
}

/// Check that a mode moving `width` lines at once fits in `dimension` lines
pub fn mode_fits(mode: Mode, dimension: usize) -> bool {
    match mode.width() {
        Some(width) => width <= dimension,
        None => true,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_compatible_combinations() {
        assert!(is_compatible(Mode::Wide(1), Mode::Wide(2)));
        assert!(is_compatible(Mode::Wide(2), Mode::Wide(3)));
        assert!(is_compatible(Mode::Wide(1), Mode::Carousel));
        assert!(is_compatible(Mode::Wide(1), Mode::Gear));
        assert!(is_compatible(Mode::Carousel, Mode::Gear));
        assert!(is_compatible(Mode::Static(1), Mode::Static(2)));
        assert!(is_compatible(Mode::Static(2), Mode::Static(3)));
    }

    #[test]
    fn test_symmetric_modes_pair_with_themselves() {
        for mode in [Mode::Bandaged, Mode::Lightning, Mode::Enabler, Mode::AxisLocked] {
            assert!(is_compatible(mode, mode));
            assert!(!is_compatible(mode, Mode::Wide(1)));
            assert!(!is_compatible(Mode::Wide(1), mode));
        }
        assert!(!is_compatible(Mode::Bandaged, Mode::Wide(2)));
        assert!(!is_compatible(Mode::AxisLocked, Mode::Bandaged));
        assert!(!is_compatible(Mode::Bandaged, Mode::Enabler));
        assert!(!is_compatible(Mode::Lightning, Mode::Bandaged));
    }

    #[test]
    fn test_static_mismatch() {
        assert!(!is_compatible(Mode::Static(1), Mode::Wide(1)));
        assert!(!is_compatible(Mode::Wide(1), Mode::Static(1)));
        assert!(!is_compatible(Mode::Static(2), Mode::Gear));
    }

    #[test]
    fn test_mode_fits() {
        assert!(mode_fits(Mode::Wide(1), 1));
        assert!(mode_fits(Mode::Wide(4), 4));
        assert!(!mode_fits(Mode::Wide(4), 3));
        assert!(!mode_fits(Mode::Wide(2), 1));
        assert!(!mode_fits(Mode::Static(3), 2));
        assert!(mode_fits(Mode::Static(3), 3));
        assert!(mode_fits(Mode::Gear, 1));
        assert!(mode_fits(Mode::Bandaged, 2));
    }
}
