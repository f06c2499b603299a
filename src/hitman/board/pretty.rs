use itertools::Itertools;

use crate::hitman::prelude::*;

use super::Board;

impl Board {
    /// Pretty-prints the board, top row first, with the agent overlaid on
    /// its square.
    pub fn pretty(&self) -> String {
        let (m, n) = self.dims();
        let rule = format!("    {}+", "+-----".repeat(m));
        let mut lines = vec![rule.clone()];

        for j in (0..n).rev() {
            let row = (0..m)
                .map(|i| {
                    let coord = Coord::new(i, j);
                    format!("{:^5}", self.square_glyph(&coord))
                })
                .join("|");
            lines.push(format!(" {j:<2} |{row}|"));
            lines.push(rule.clone());
        }

        let footer = (0..m).map(|i| format!("   {i}  ")).join("");
        lines.push(format!("    {footer}"));
        lines.join("\n")
    }

    fn square_glyph(&self, coord: &Coord) -> String {
        let glyph = self.content(coord).glyph();
        match self.hitman() {
            Some((here, facing)) if here == *coord => {
                let agent = if self.suit_on() { 'h' } else { 'H' };
                if glyph == " " {
                    format!("{agent}{}", facing.glyph())
                } else {
                    format!("{agent}{} {glyph}", facing.glyph())
                }
            }
            _ => glyph,
        }
    }
}

impl std::fmt::Display for Board {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.pretty())
    }
}
