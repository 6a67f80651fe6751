use crate::error::EngineError;

/// An RGB triple, the same `[r, g, b]` layout used throughout the display code
pub type Color = [u8; 3];

pub const BLACK: Color = [0, 0, 0];

/// A monochrome bitmap: every lit cell is drawn in `color`.
///
/// Cells are stored row-major, so the cell at `(x, y)` lives at
/// `y * width + x`. `cells.len() == width * height` holds for every glyph
/// this module hands out; all transforms return new glyphs and never touch
/// their input.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Glyph {
    width: usize,
    height: usize,
    pub color: Color,
    cells: Vec<bool>,
}

impl Glyph {
    /// Build a glyph from raw cells, checking the cell count against the geometry
    pub fn new(
        label: &str,
        width: usize,
        height: usize,
        color: Color,
        cells: Vec<bool>,
    ) -> Result<Self, EngineError> {
        if cells.len() != width * height {
            return Err(EngineError::InvalidGlyphDimensions {
                label: label.to_string(),
                width,
                height,
                cells: cells.len(),
            });
        }

        Ok(Self {
            width,
            height,
            color,
            cells,
        })
    }

    /// A zero-width glyph, the seed for joining banners together
    pub fn empty(height: usize, color: Color) -> Self {
        Self {
            width: 0,
            height,
            color,
            cells: Vec::new(),
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn cells(&self) -> &[bool] {
        &self.cells
    }

    /// Whether the cell at `(x, y)` is lit; out-of-range cells are off
    pub fn is_on(&self, x: usize, y: usize) -> bool {
        x < self.width && y < self.height && self.cells[y * self.width + x]
    }

    /// Iterate over every cell as `(x, y, lit)` in row-major order
    pub fn iter_cells(&self) -> impl Iterator<Item = (usize, usize, bool)> + '_ {
        let width = self.width;
        self.cells
            .iter()
            .enumerate()
            .map(move |(i, &on)| (i % width, i / width, on))
    }

    /// Same bitmap with a different color
    pub fn tinted(mut self, color: Color) -> Self {
        self.color = color;
        self
    }

    /// Join `self` and `other` side by side with `gap` blank columns between them.
    ///
    /// Both glyphs must have the same height. The result takes `other`'s color,
    /// which lets a banner be grown from an empty seed and tinted once at the end.
    pub fn join(&self, other: &Glyph, gap: usize) -> Glyph {
        debug_assert_eq!(
            self.height, other.height,
            "joined glyphs must share a height"
        );

        let height = self.height;
        let width = self.width + gap + other.width;
        let right_start = self.width + gap;
        let mut cells = vec![false; width * height];

        for y in 0..height {
            for x in 0..width {
                cells[y * width + x] = if x < self.width {
                    self.cells[y * self.width + x]
                } else if x >= right_start {
                    other.cells[y * other.width + (x - right_start)]
                } else {
                    false
                };
            }
        }

        Glyph {
            width,
            height,
            color: other.color,
            cells,
        }
    }

    /// Mirror the glyph left to right
    pub fn flipped(&self) -> Glyph {
        let mut cells = Vec::with_capacity(self.cells.len());
        for y in 0..self.height {
            for x in 0..self.width {
                cells.push(self.cells[y * self.width + (self.width - 1 - x)]);
            }
        }

        Glyph {
            width: self.width,
            height: self.height,
            color: self.color,
            cells,
        }
    }

    /// Remove every column that has no lit cell, closing the gaps.
    ///
    /// This turns fixed 5-wide letter cells into their natural width.
    pub fn trimmed(&self) -> Glyph {
        let empty = self.empty_columns();
        self.without_columns(&empty)
    }

    /// Like [`Glyph::trimmed`], but removes at most `keep` empty columns,
    /// the leftmost ones first. Later empty columns stay, so `keep = 0` is the
    /// identity and `keep = 1` drops a single column.
    pub fn left_trimmed(&self, keep: usize) -> Glyph {
        let mut counted = 0;
        let drop: Vec<bool> = self
            .empty_columns()
            .into_iter()
            .map(|empty| {
                if empty && counted < keep {
                    counted += 1;
                    true
                } else {
                    false
                }
            })
            .collect();

        self.without_columns(&drop)
    }

    /// One flag per column, set when the column has no lit cell
    fn empty_columns(&self) -> Vec<bool> {
        (0..self.width)
            .map(|x| (0..self.height).all(|y| !self.cells[y * self.width + x]))
            .collect()
    }

    fn without_columns(&self, drop: &[bool]) -> Glyph {
        let kept: Vec<usize> = (0..self.width).filter(|&x| !drop[x]).collect();
        let width = kept.len();
        let mut cells = Vec::with_capacity(width * self.height);
        for y in 0..self.height {
            for &x in &kept {
                cells.push(self.cells[y * self.width + x]);
            }
        }

        Glyph {
            width,
            height: self.height,
            color: self.color,
            cells,
        }
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use proptest::prelude::*;

    /// Parse rows such as `"01100"` into a glyph, for readable fixtures
    pub(crate) fn glyph_from_rows(rows: &[&str]) -> Glyph {
        let width = rows.first().map_or(0, |row| row.len());
        let cells = rows
            .iter()
            .flat_map(|row| row.chars().map(|c| c == '1'))
            .collect();
        Glyph::new("fixture", width, rows.len(), [255, 255, 255], cells).unwrap()
    }

    fn arb_glyph() -> impl Strategy<Value = Glyph> {
        (1usize..8, 1usize..6).prop_flat_map(|(width, height)| {
            proptest::collection::vec(any::<bool>(), width * height).prop_map(move |cells| {
                Glyph::new("arb", width, height, [10, 20, 30], cells).unwrap()
            })
        })
    }

    fn arb_pair() -> impl Strategy<Value = (Glyph, Glyph, usize)> {
        (1usize..8, 1usize..8, 1usize..6, 0usize..3).prop_flat_map(|(wa, wb, height, gap)| {
            (
                proptest::collection::vec(any::<bool>(), wa * height),
                proptest::collection::vec(any::<bool>(), wb * height),
            )
                .prop_map(move |(a, b)| {
                    (
                        Glyph::new("a", wa, height, [1, 1, 1], a).unwrap(),
                        Glyph::new("b", wb, height, [2, 2, 2], b).unwrap(),
                        gap,
                    )
                })
        })
    }

    fn holds_invariant(g: &Glyph) -> bool {
        g.cells().len() == g.width() * g.height()
    }

    #[test]
    fn test_new_rejects_wrong_cell_count() {
        let err = Glyph::new("bad", 3, 5, BLACK, vec![false; 14]).unwrap_err();
        assert_eq!(
            err,
            EngineError::InvalidGlyphDimensions {
                label: "bad".to_string(),
                width: 3,
                height: 5,
                cells: 14,
            }
        );
    }

    #[test]
    fn test_join_takes_trailing_color() {
        let a = glyph_from_rows(&["1", "1"]).tinted([9, 0, 0]);
        let b = glyph_from_rows(&["01", "10"]).tinted([0, 9, 0]);
        let joined = a.join(&b, 1);

        assert_eq!(joined.color, [0, 9, 0]);
        assert_eq!(joined, glyph_from_rows(&["1001", "1010"]).tinted([0, 9, 0]));
    }

    #[test]
    fn test_join_onto_empty_seed() {
        let b = glyph_from_rows(&["101", "010"]);
        let joined = Glyph::empty(2, BLACK).join(&b, 0);
        assert_eq!(joined, b);
    }

    #[test]
    fn test_trim_letter_i_to_stem() {
        let letter_i = glyph_from_rows(&["01110", "00100", "00100", "00100", "01110"]);
        let trimmed = letter_i.trimmed();
        assert_eq!(trimmed.width(), 3);
        assert_eq!(
            trimmed,
            glyph_from_rows(&["111", "010", "010", "010", "111"])
        );
    }

    #[test]
    fn test_trim_removes_interior_columns() {
        let g = glyph_from_rows(&["10001", "10001"]);
        assert_eq!(g.trimmed(), glyph_from_rows(&["11", "11"]));
    }

    #[test]
    fn test_trim_blank_glyph_collapses_to_zero_width() {
        let g = glyph_from_rows(&["000", "000"]);
        let trimmed = g.trimmed();
        assert_eq!(trimmed.width(), 0);
        assert_eq!(trimmed.height(), 2);
        assert!(trimmed.cells().is_empty());
    }

    #[test]
    fn test_left_trim_stops_after_keep_columns() {
        let g = glyph_from_rows(&["0010010", "0010010"]);
        assert_eq!(g.left_trimmed(0), g);
        assert_eq!(g.left_trimmed(1), glyph_from_rows(&["010010", "010010"]));
        assert_eq!(g.left_trimmed(3), glyph_from_rows(&["1010", "1010"]));
        assert_eq!(g.left_trimmed(10), g.trimmed());
    }

    #[test]
    fn test_left_trim_removes_exactly_keep_columns() {
        // Four empty columns: 0, 1, 3 and 5
        let g = glyph_from_rows(&["0010101", "0010101"]);
        for keep in 0..=4 {
            assert_eq!(g.left_trimmed(keep).width(), g.width() - keep);
        }
        assert_eq!(g.left_trimmed(1), glyph_from_rows(&["010101", "010101"]));
        assert_eq!(g.left_trimmed(5), g.trimmed());
    }

    #[test]
    fn test_flip_mirrors_rows() {
        let g = glyph_from_rows(&["110", "001"]);
        assert_eq!(g.flipped(), glyph_from_rows(&["011", "100"]));
    }

    #[test]
    fn test_flip_non_square() {
        let g = glyph_from_rows(&["10000", "01000", "00100"]);
        assert_eq!(g.flipped(), glyph_from_rows(&["00001", "00010", "00100"]));
    }

    proptest! {
        #[test]
        fn prop_transforms_keep_cell_invariant(g in arb_glyph(), keep in 0usize..8) {
            prop_assert!(holds_invariant(&g.trimmed()));
            prop_assert!(holds_invariant(&g.flipped()));
            prop_assert!(holds_invariant(&g.left_trimmed(keep)));
        }

        #[test]
        fn prop_join_geometry((a, b, gap) in arb_pair()) {
            let joined = a.join(&b, gap);
            prop_assert!(holds_invariant(&joined));
            prop_assert_eq!(joined.width(), a.width() + gap + b.width());
            prop_assert_eq!(joined.height(), a.height());

            for y in 0..joined.height() {
                for x in 0..joined.width() {
                    let expected = if x < a.width() {
                        a.is_on(x, y)
                    } else if x < a.width() + gap {
                        false
                    } else {
                        b.is_on(x - a.width() - gap, y)
                    };
                    prop_assert_eq!(joined.is_on(x, y), expected);
                }
            }
        }

        #[test]
        fn prop_trim_is_idempotent(g in arb_glyph()) {
            let once = g.trimmed();
            prop_assert_eq!(once.trimmed(), once);
        }

        #[test]
        fn prop_trim_never_expands(g in arb_glyph()) {
            let trimmed = g.trimmed();
            let has_empty_column = (0..g.width())
                .any(|x| (0..g.height()).all(|y| !g.is_on(x, y)));
            prop_assert!(trimmed.width() <= g.width());
            prop_assert_eq!(trimmed.width() == g.width(), !has_empty_column);
        }

        #[test]
        fn prop_flip_is_involution(g in arb_glyph()) {
            prop_assert_eq!(g.flipped().flipped(), g);
        }

        #[test]
        fn prop_left_trim_between_identity_and_full_trim(g in arb_glyph(), keep in 0usize..8) {
            let partial = g.left_trimmed(keep);
            prop_assert!(partial.width() <= g.width());
            prop_assert!(partial.width() >= g.trimmed().width());
            prop_assert_eq!(partial.trimmed(), g.trimmed());
        }
    }
}
