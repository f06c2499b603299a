use crate::utils::prelude::*;

use super::consts::Direction;

/// What a board square holds. Facing lives only in the person variants;
/// walls and objects never carry one.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Content {
    Unknown,
    Empty,
    Wall,
    Rope,
    Suit,
    Target,
    Guard(Direction),
    Guest(Direction),
}

impl Content {
    /// Whether the content has been determined.
    pub fn is_known(&self) -> bool {
        *self != Content::Unknown
    }

    /// Whether the agent is barred from standing here. Unknown cells are
    /// not forbidden; only a known wall or guard is.
    pub fn is_forbidden(&self) -> bool {
        matches!(self, Content::Wall | Content::Guard(_))
    }

    /// Whether the content is a guard or a guest.
    pub fn is_person(&self) -> bool {
        matches!(self, Content::Guard(_) | Content::Guest(_))
    }

    /// The facing of the person in this cell, if it is one.
    pub fn facing(&self) -> Option<Direction> {
        match self {
            Content::Guard(d) | Content::Guest(d) => Some(*d),
            _ => None,
        }
    }

    /// Glyph used by the board renderer.
    pub fn glyph(&self) -> String {
        match self {
            Content::Unknown => "?".into(),
            Content::Empty => " ".into(),
            Content::Wall => "███".into(),
            Content::Rope => "CD".into(),
            Content::Suit => "CS".into(),
            Content::Target => "C".into(),
            Content::Guard(d) => format!("G{}", d.glyph()),
            Content::Guest(d) => format!("I{}", d.glyph()),
        }
    }
}

/// One square of the agent's board model.
///
/// Content assignment is one-shot: once a cell is known it can only change
/// through [`Cell::erase`], which models a phase-2 removal. The
/// `proven_not_guard` flag is monotone; it is raised when the solver (or a
/// counter argument) refutes the guard hypothesis and never lowered.
#[derive(Clone, Copy, Debug, Default)]
pub struct Cell {
    content: Option<Content>,
    proven_not_guard: bool,
}

impl Cell {
    /// The content of the cell, `Content::Unknown` until determined.
    pub fn content(&self) -> Content {
        self.content.unwrap_or(Content::Unknown)
    }

    /// Whether the content has been determined.
    pub fn is_known(&self) -> bool {
        self.content.is_some()
    }

    /// Whether the guard hypothesis for this cell has been refuted.
    pub fn proven_not_guard(&self) -> bool {
        self.proven_not_guard
    }

    /// Records the content of the cell. Assigning twice, or assigning
    /// `Unknown`, is a programmer fault.
    pub fn set_content(&mut self, content: Content) -> Result<()> {
        if self.is_known() {
            return Err(anyhow!(HitmanError::InvalidArgument(
                "cell content is already known".into()
            )));
        }
        if content == Content::Unknown {
            return Err(anyhow!(HitmanError::InvalidArgument(
                "cannot assign Unknown as a content".into()
            )));
        }
        self.content = Some(content);
        Ok(())
    }

    /// Removes the content of the cell. Used when a phase-2 action empties
    /// the square (kill, neutralize, pickup).
    pub fn erase(&mut self) {
        self.content = Some(Content::Empty);
        self.proven_not_guard = true;
    }

    /// Raises the monotone not-a-guard flag.
    pub fn prove_not_guard(&mut self) {
        self.proven_not_guard = true;
    }
}

#[cfg(test)]
mod tests {
    use super::{Cell, Content};
    use crate::hitman::consts::Direction;

    #[test]
    fn content_is_one_shot() {
        let mut cell = Cell::default();
        assert!(!cell.is_known());
        cell.set_content(Content::Wall).unwrap();
        assert!(cell.set_content(Content::Empty).is_err());
        assert_eq!(cell.content(), Content::Wall);
    }

    #[test]
    fn erase_reopens_the_square_as_empty() {
        let mut cell = Cell::default();
        cell.set_content(Content::Guard(Direction::West)).unwrap();
        cell.erase();
        assert_eq!(cell.content(), Content::Empty);
    }

    #[test]
    fn persons_carry_a_facing_and_objects_do_not() {
        assert_eq!(Content::Guest(Direction::North).facing(), Some(Direction::North));
        assert_eq!(Content::Rope.facing(), None);
        assert!(Content::Guard(Direction::South).is_forbidden());
        assert!(!Content::Unknown.is_forbidden());
    }
}
