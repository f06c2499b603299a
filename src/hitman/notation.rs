use crate::utils::prelude::*;

use super::cell::Content;
use super::consts::Direction;

// Token notation for cell contents, used by world files and tests:
// "." empty, "#" wall, "R" rope, "S" suit, "T" target, "G<dir>" guard,
// "C<dir>" civil guest, "?" unknown.

impl std::str::FromStr for Content {
    type Err = Error;
    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "?" => Ok(Content::Unknown),
            "." => Ok(Content::Empty),
            "#" => Ok(Content::Wall),
            "R" | "r" => Ok(Content::Rope),
            "S" | "s" => Ok(Content::Suit),
            "T" | "t" => Ok(Content::Target),
            _ => {
                let (kind, facing) = s.split_at_checked(1)
                    .ok_or_else(|| anyhow!("invalid notation {s} for Content"))?;
                let facing = facing.parse::<Direction>()
                    .map_err(|_| anyhow!("invalid notation {s} for Content"))?;
                match kind {
                    "G" | "g" => Ok(Content::Guard(facing)),
                    "C" | "c" => Ok(Content::Guest(facing)),
                    _ => Err(anyhow!("invalid notation {s} for Content")),
                }
            }
        }
    }
}

impl std::fmt::Display for Content {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Content::Unknown => write!(f, "?"),
            Content::Empty => write!(f, "."),
            Content::Wall => write!(f, "#"),
            Content::Rope => write!(f, "R"),
            Content::Suit => write!(f, "S"),
            Content::Target => write!(f, "T"),
            Content::Guard(d) => write!(f, "G{d}"),
            Content::Guest(d) => write!(f, "C{d}"),
        }
    }
}

/// A parsed world grid: whitespace-separated content tokens, one line per
/// row, top row first. Every cell must be concrete (no `?`), since a world
/// describes ground truth rather than knowledge.
#[derive(Clone, Debug)]
pub struct WorldString {
    pub repr: String,
    pub m: usize,
    pub n: usize,
    /// Contents indexed `[i][j]`, origin bottom-left.
    pub cells: Vec<Vec<Content>>,
}

impl std::str::FromStr for WorldString {
    type Err = Error;
    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let rows: Vec<Vec<Content>> = s
            .lines()
            .filter(|line| !line.trim().is_empty())
            .map(|line| line.split_whitespace().map(|tok| tok.parse::<Content>()).collect())
            .collect::<std::result::Result<_, _>>()?;

        let n = rows.len();
        if n == 0 {
            return Err(anyhow!("world cannot be empty"));
        }
        let m = rows[0].len();
        if m == 0 || rows.iter().any(|row| row.len() != m) {
            return Err(anyhow!("world rows must all have the same positive width"));
        }
        if rows.iter().flatten().any(|c| !c.is_known()) {
            return Err(anyhow!("world cells must all be concrete"));
        }

        // The first parsed line is the top row (j = n - 1).
        let mut cells = vec![vec![Content::Empty; n]; m];
        for (line_idx, row) in rows.iter().enumerate() {
            for (i, content) in row.iter().enumerate() {
                cells[i][n - 1 - line_idx] = *content;
            }
        }
        Ok(WorldString { repr: s.to_owned(), m, n, cells })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn content_tokens_round_trip() {
        for token in ["?", ".", "#", "R", "S", "T", "GN", "GE", "CS", "CW"] {
            let content = token.parse::<Content>().unwrap();
            assert_eq!(content.to_string(), token);
        }
        assert!("X".parse::<Content>().is_err());
        assert!("GQ".parse::<Content>().is_err());
    }

    #[test]
    fn world_lines_are_read_top_down() {
        let world = ". GW .\n. # T\n. . R\n".parse::<WorldString>().unwrap();
        assert_eq!((world.m, world.n), (3, 3));
        assert_eq!(world.cells[1][2], Content::Guard(Direction::West));
        assert_eq!(world.cells[1][1], Content::Wall);
        assert_eq!(world.cells[2][0], Content::Rope);
        assert_eq!(world.cells[0][0], Content::Empty);
    }

    #[test]
    fn ragged_and_unknown_worlds_are_rejected() {
        assert!(". .\n.".parse::<WorldString>().is_err());
        assert!(". ?\n. .".parse::<WorldString>().is_err());
    }
}
