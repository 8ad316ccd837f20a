//! Subsets (`L ⊂ A ⊂ B`) and their required-format lists.
//!
//! The extension graph is a static DAG `B ⟶ A ⟶ L`; `subset_views` and
//! `diff_formats` are transitive-closure computations over that DAG, done
//! once (not per call) since the graph never changes at runtime.
use crate::format::Format;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Subset {
    L,
    A,
    B,
}

impl Subset {
    pub fn id(&self) -> char {
        match self {
            Subset::L => 'L',
            Subset::A => 'A',
            Subset::B => 'B',
        }
    }

    pub fn tag(&self) -> &'static str {
        match self {
            Subset::L => "l",
            Subset::A => "a",
            Subset::B => "b",
        }
    }

    /// Looks up a subset by its single-character id (as found in the
    /// `version_<S>_<major>.<minor>` marker file name).
    pub fn from_id(id: char) -> Option<Subset> {
        match id {
            'L' => Some(Subset::L),
            'A' => Some(Subset::A),
            'B' => Some(Subset::B),
            _ => None,
        }
    }

    /// Formats required to build a document of this subset, in the order
    /// the combiner expects its record iterators.
    pub fn formats(&self) -> &'static [Format] {
        match self {
            Subset::L => &[Format::Txt],
            Subset::A => &[
                Format::Txt,
                Format::Html,
                Format::Inlink,
                Format::Outlink,
                Format::Vdom,
            ],
            Subset::B => &[
                Format::Txt,
                Format::Html,
                Format::Inlink,
                Format::Outlink,
                Format::Vdom,
                // Format::Jpg: screenshots are reserved, not yet active.
            ],
        }
    }

    /// The subset this one extends, if any (`B` extends `A`, `A` extends `L`).
    pub fn extends(&self) -> Option<Subset> {
        match self {
            Subset::L => None,
            Subset::A => Some(Subset::L),
            Subset::B => Some(Subset::A),
        }
    }

    /// All subsets this subset can be viewed as: itself plus every subset
    /// it transitively extends.
    pub fn subset_views(&self) -> Vec<Subset> {
        let mut views = vec![*self];
        let mut current = *self;
        while let Some(parent) = current.extends() {
            views.push(parent);
            current = parent;
        }
        views
    }

    /// Formats required by this subset but by none of the subsets it
    /// extends. These are the authoritative document-count source for the
    /// subset (see `spec.md` §4.3).
    pub fn diff_formats(&self) -> Vec<Format> {
        let own: Vec<Format> = self.formats().to_vec();
        let mut diff = own.clone();
        for view in self.subset_views() {
            if view == *self {
                continue;
            }
            diff.retain(|f| !view.formats().contains(f));
        }
        diff
    }
}
